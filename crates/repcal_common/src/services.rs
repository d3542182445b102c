// --- File: crates/repcal_common/src/services.rs ---
//! Service abstractions for the engine's two collaborators.
//!
//! The local appointment store is authoritative; the external calendar
//! source is an optional, best-effort mirror. Both are traits so the
//! scheduling engine can be driven by sqlx/Google implementations in
//! production and by in-memory fakes in tests.

use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;
use std::pin::Pin;

use crate::models::{
    AppointmentChanges, AppointmentRecord, ExternalCredentials, ExternalEvent,
    ExternalEventPayload, ExternalEventRef, NewAppointment,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Authoritative persistence for appointments.
///
/// Implementations must serialize writes to a single record (one writer
/// per record at a time); they are not required to prevent two different
/// records from overlapping in time.
pub trait AppointmentStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All appointments of `rep_id` on `date`, ordered by start time.
    fn list(&self, rep_id: &str, date: NaiveDate)
        -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error>;

    /// Persist a new appointment and return it with its assigned id.
    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, AppointmentRecord, Self::Error>;

    /// Apply `changes` to appointment `id` and return the updated record.
    fn update(
        &self,
        id: i64,
        changes: AppointmentChanges,
    ) -> BoxFuture<'_, AppointmentRecord, Self::Error>;
}

/// Best-effort external calendar that mirrors local appointments.
///
/// Every call carries the rep's credentials. An absent or rejected token
/// surfaces as an ordinary error.
pub trait ExternalCalendarSource: Send + Sync {
    /// Error type returned by calendar operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Events intersecting `[time_min, time_max)`.
    fn list_events(
        &self,
        credentials: &ExternalCredentials,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<ExternalEvent>, Self::Error>;

    /// Create a mirrored event.
    fn create_event(
        &self,
        credentials: &ExternalCredentials,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error>;

    /// Update a previously mirrored event.
    fn update_event(
        &self,
        credentials: &ExternalCredentials,
        event_id: &str,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error>;
}
