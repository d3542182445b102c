// --- File: crates/repcal_scheduling/src/error.rs ---
use chrono::NaiveDateTime;
use repcal_common::RepcalError;
use thiserror::Error;

/// Errors returned by the availability and booking engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// Input rejected before any store was touched.
    #[error("{0}")]
    Validation(String),
    /// The authoritative store failed; the message is passed through as-is.
    #[error("{0}")]
    LocalStore(String),
    #[error("interval end {end} is not after start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// A newer request from the same caller was issued meanwhile.
    #[error("request {ticket} superseded by request {latest}")]
    Superseded { ticket: u64, latest: u64 },
}

impl From<SchedulingError> for RepcalError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation(message) => RepcalError::ValidationError(message),
            SchedulingError::LocalStore(message) => RepcalError::DatabaseError(message),
            SchedulingError::InvalidInterval { .. } => RepcalError::InternalError(err.to_string()),
            SchedulingError::Superseded { .. } => RepcalError::SupersededError(err.to_string()),
        }
    }
}
