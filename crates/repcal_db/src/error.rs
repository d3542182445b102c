//! Error types for the appointment store

use thiserror::Error;

/// Errors that can occur when working with the local appointment store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A stored row could not be turned back into an appointment
    #[error("Malformed appointment row: {0}")]
    DecodeError(String),

    /// No appointment with the given id
    #[error("Appointment {0} not found")]
    NotFound(i64),
}
