// --- File: crates/repcal_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP error mapping
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Store and calendar abstractions


// Re-export error types and utilities for easier access
pub use error::{config_error, database_error, internal_error, HttpStatusCode, RepcalError};

pub use http::IntoHttpResponse;

pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{AppointmentStore, BoxFuture, ExternalCalendarSource};
