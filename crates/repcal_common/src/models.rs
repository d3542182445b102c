// --- File: crates/repcal_common/src/models.rs ---

// Data structures shared between the appointment store, the calendar
// source and the scheduling engine.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment lengths a booking may use, in minutes.
pub const ALLOWED_DURATIONS: [u32; 6] = [15, 30, 45, 60, 90, 120];

/// Returns `true` if `minutes` is one of [`ALLOWED_DURATIONS`].
pub fn is_allowed_duration(minutes: u32) -> bool {
    ALLOWED_DURATIONS.contains(&minutes)
}

/// Lifecycle status of a local appointment.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Cancelled appointments no longer block the rep's time.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status: {}", other)),
        }
    }
}

/// An appointment as persisted by the local appointment store.
///
/// Date and start time are wall-clock values in the configured working timezone.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: i64,
    pub prospect_id: String,
    pub rep_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date", example = "2025-05-05"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00:00"))]
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub place: Option<String>,
    pub notes: Option<String>,
    /// Id of the mirrored event in the external calendar, once synced.
    pub external_ref: Option<String>,
    pub status: AppointmentStatus,
}

impl AppointmentRecord {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Fields for a new appointment. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub prospect_id: String,
    pub rep_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub place: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

/// Partial update of an appointment; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentChanges {
    pub prospect_id: Option<String>,
    pub rep_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
    /// `Some(None)` clears the place.
    pub place: Option<Option<String>>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
    pub external_ref: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentChanges {
    /// Changes that only attach an external-reference id.
    pub fn external_ref(external_ref: impl Into<String>) -> Self {
        Self {
            external_ref: Some(external_ref.into()),
            ..Default::default()
        }
    }

    /// Applies the changes to `record` in place.
    pub fn apply_to(self, record: &mut AppointmentRecord) {
        if let Some(v) = self.prospect_id {
            record.prospect_id = v;
        }
        if let Some(v) = self.rep_id {
            record.rep_id = v;
        }
        if let Some(v) = self.date {
            record.date = v;
        }
        if let Some(v) = self.start_time {
            record.start_time = v;
        }
        if let Some(v) = self.duration_minutes {
            record.duration_minutes = v;
        }
        if let Some(v) = self.place {
            record.place = v;
        }
        if let Some(v) = self.notes {
            record.notes = v;
        }
        if let Some(v) = self.external_ref {
            record.external_ref = Some(v);
        }
        if let Some(v) = self.status {
            record.status = v;
        }
    }
}

/// OAuth credentials of the rep's external calendar.
///
/// The engine only forwards them; it never refreshes the access token.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCredentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl ExternalCredentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
        }
    }
}

impl fmt::Debug for ExternalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCredentials")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Start or end of an external event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTime {
    /// A timed boundary.
    At(DateTime<Utc>),
    /// A date-only boundary of an all-day event; end dates are exclusive.
    AllDay(NaiveDate),
}

/// An event read from the external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEvent {
    pub id: String,
    pub start: EventTime,
    pub end: Option<EventTime>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Event body sent to the external calendar on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEventPayload {
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Option<String>,
}

/// Identifier returned by the external calendar after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEventRef {
    pub id: String,
}
