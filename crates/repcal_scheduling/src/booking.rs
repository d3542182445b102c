// --- File: crates/repcal_scheduling/src/booking.rs ---
//! Booking as a sequential dual write.
//!
//! The local store is written first and is the source of truth. The
//! external calendar is then mirrored once; a failed mirror degrades the
//! outcome but never undoes the local write.

use chrono_tz::Tz;
use repcal_common::models::{
    AppointmentChanges, AppointmentRecord, ExternalCredentials, ExternalEventPayload,
};
use repcal_common::services::{AppointmentStore, ExternalCalendarSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::SchedulingError;
use crate::interval::local_to_utc;
use crate::validation::{validate_fields, AppointmentFields, ValidatedAppointment};

pub const NOT_CONNECTED_NOTICE: &str =
    "Appointment saved. It was not added to your calendar because no calendar is connected.";
pub const SYNC_ERROR_NOTICE: &str =
    "Appointment saved, but it could not be synced to your calendar.";

/// States a booking passes through.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingState {
    Initiated,
    LocalWriteFailed,
    LocalCommitted,
    ExternalSynced,
    ExternalSyncFailed,
    Done,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Success,
    /// Saved locally, not mirrored.
    PartialSuccess,
    Failure,
}

/// Why a committed booking was not mirrored.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncIssue {
    NotConnected,
    SyncError,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    LocalStore,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of [`BookingCoordinator::book`].
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingOutcome {
    pub status: BookingStatus,
    /// The committed record; absent only on failure.
    pub appointment: Option<AppointmentRecord>,
    pub external_sync_error: Option<String>,
    pub sync_issue: Option<SyncIssue>,
    /// Dismissable message for a partial success.
    pub notice: Option<String>,
    pub failure: Option<BookingFailure>,
    pub trail: Vec<BookingState>,
}

impl BookingOutcome {
    fn failed(kind: FailureKind, message: String, trail: Vec<BookingState>) -> Self {
        Self {
            status: BookingStatus::Failure,
            appointment: None,
            external_sync_error: None,
            sync_issue: None,
            notice: None,
            failure: Some(BookingFailure { kind, message }),
            trail,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == BookingStatus::Failure
    }
}

struct Trail(Vec<BookingState>);

impl Trail {
    fn start() -> Self {
        debug!("Booking state: {:?}", BookingState::Initiated);
        Self(vec![BookingState::Initiated])
    }

    fn enter(&mut self, state: BookingState) {
        debug!("Booking state: {:?}", state);
        self.0.push(state);
    }

    fn finish(mut self) -> Vec<BookingState> {
        self.enter(BookingState::Done);
        self.0
    }
}

/// Event body mirroring `record`, with wall-clock times resolved in `time_zone`.
pub fn event_payload(record: &AppointmentRecord, time_zone: Tz) -> ExternalEventPayload {
    ExternalEventPayload {
        summary: format!("Appointment: {}", record.prospect_id),
        description: record.notes.clone(),
        start: local_to_utc(time_zone, record.starts_at()),
        end: local_to_utc(time_zone, record.ends_at()),
        location: record.place.clone(),
    }
}

pub struct BookingCoordinator<S, C> {
    store: Arc<S>,
    calendar: Option<Arc<C>>,
    time_zone: Tz,
}

impl<S, C> Clone for BookingCoordinator<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            calendar: self.calendar.clone(),
            time_zone: self.time_zone,
        }
    }
}

impl<S, C> BookingCoordinator<S, C>
where
    S: AppointmentStore,
    C: ExternalCalendarSource,
{
    pub fn new(store: Arc<S>, calendar: Option<Arc<C>>, time_zone: Tz) -> Self {
        Self {
            store,
            calendar,
            time_zone,
        }
    }

    /// Create or update an appointment and mirror it to the external calendar.
    ///
    /// Invalid fields fail before either store is touched. The mirror is
    /// attempted once; an existing external reference is updated, never
    /// duplicated.
    pub async fn book(
        &self,
        fields: AppointmentFields,
        credentials: Option<ExternalCredentials>,
    ) -> BookingOutcome {
        let mut trail = Trail::start();

        let validated = match validate_fields(fields) {
            Ok(validated) => validated,
            Err(e) => {
                info!("Booking rejected: {}", e);
                return BookingOutcome::failed(FailureKind::Validation, e.to_string(), trail.finish());
            }
        };

        let record = match self.write_local(validated).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Booking failed in local store: {}", e);
                trail.enter(BookingState::LocalWriteFailed);
                return BookingOutcome::failed(FailureKind::LocalStore, e.to_string(), trail.finish());
            }
        };
        trail.enter(BookingState::LocalCommitted);
        info!("Appointment {} committed locally", record.id);

        let (calendar, credentials) = match (&self.calendar, credentials) {
            (Some(calendar), Some(credentials)) => (calendar, credentials),
            _ => {
                trail.enter(BookingState::ExternalSyncFailed);
                info!("Appointment {} not mirrored: no calendar connected", record.id);
                return BookingOutcome {
                    status: BookingStatus::PartialSuccess,
                    appointment: Some(record),
                    external_sync_error: Some("external calendar not connected".to_string()),
                    sync_issue: Some(SyncIssue::NotConnected),
                    notice: Some(NOT_CONNECTED_NOTICE.to_string()),
                    failure: None,
                    trail: trail.finish(),
                };
            }
        };

        match self.mirror(calendar, &credentials, record.clone()).await {
            Ok(record) => {
                trail.enter(BookingState::ExternalSynced);
                info!("Appointment {} mirrored to external calendar", record.id);
                BookingOutcome {
                    status: BookingStatus::Success,
                    appointment: Some(record),
                    external_sync_error: None,
                    sync_issue: None,
                    notice: None,
                    failure: None,
                    trail: trail.finish(),
                }
            }
            Err(message) => {
                trail.enter(BookingState::ExternalSyncFailed);
                warn!("Appointment {} not mirrored: {}", record.id, message);
                BookingOutcome {
                    status: BookingStatus::PartialSuccess,
                    appointment: Some(record),
                    external_sync_error: Some(message),
                    sync_issue: Some(SyncIssue::SyncError),
                    notice: Some(SYNC_ERROR_NOTICE.to_string()),
                    failure: None,
                    trail: trail.finish(),
                }
            }
        }
    }

    async fn write_local(
        &self,
        validated: ValidatedAppointment,
    ) -> Result<AppointmentRecord, SchedulingError> {
        let result = match validated.id {
            Some(id) => self.store.update(id, validated.into_changes()).await,
            None => self.store.create(validated.into_new()).await,
        };
        result.map_err(|e| SchedulingError::LocalStore(e.to_string()))
    }

    /// Write the mirror event and remember its id on the local record.
    async fn mirror(
        &self,
        calendar: &C,
        credentials: &ExternalCredentials,
        record: AppointmentRecord,
    ) -> Result<AppointmentRecord, String> {
        let payload = event_payload(&record, self.time_zone);

        let event = match record.external_ref.as_deref() {
            Some(event_id) => calendar.update_event(credentials, event_id, payload).await,
            None => calendar.create_event(credentials, payload).await,
        }
        .map_err(|e| e.to_string())?;

        if record.external_ref.as_deref() == Some(event.id.as_str()) {
            return Ok(record);
        }

        self.store
            .update(record.id, AppointmentChanges::external_ref(event.id.clone()))
            .await
            .map_err(|e| {
                format!(
                    "calendar event {} was written but its reference could not be saved: {}",
                    event.id, e
                )
            })
    }
}
