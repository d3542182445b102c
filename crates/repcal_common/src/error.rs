// --- File: crates/repcal_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for errors that reach the HTTP layer.
///
/// Crates keep their own error enums and convert into `RepcalError` at the
/// handler boundary. External calendar failures never become one; they
/// only degrade a result.
#[derive(Error, Debug)]
pub enum RepcalError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred in the local appointment store
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The request was superseded by a newer one from the same caller
    #[error("Request superseded: {0}")]
    SupersededError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RepcalError {
    fn status_code(&self) -> u16 {
        match self {
            RepcalError::ConfigError(_) => 500,
            RepcalError::ValidationError(_) => 400,
            RepcalError::DatabaseError(_) => 500,
            RepcalError::SupersededError(_) => 409,
            RepcalError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> RepcalError {
    RepcalError::ConfigError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> RepcalError {
    RepcalError::DatabaseError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> RepcalError {
    RepcalError::InternalError(message.to_string())
}
