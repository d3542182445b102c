// --- File: crates/repcal_scheduling/src/validation.rs ---
use chrono::{NaiveDate, NaiveTime};
use repcal_common::models::{
    is_allowed_duration, AppointmentChanges, AppointmentStatus, NewAppointment, ALLOWED_DURATIONS,
};
use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;

/// Appointment fields as submitted by a caller, before validation.
///
/// With `id` set the booking edits that appointment; without it a new one
/// is created.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFields {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub prospect_id: String,
    #[serde(default)]
    pub rep_id: String,
    /// `YYYY-MM-DD`
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    #[serde(default)]
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`, working-timezone wall clock
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAppointment {
    pub id: Option<i64>,
    pub prospect_id: String,
    pub rep_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub place: Option<String>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl ValidatedAppointment {
    pub fn into_new(self) -> NewAppointment {
        NewAppointment {
            prospect_id: self.prospect_id,
            rep_id: self.rep_id,
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes,
            place: self.place,
            notes: self.notes,
            status: self.status.unwrap_or_default(),
        }
    }

    /// Every submitted field as a change, so an empty place or note clears
    /// the stored one; the stored external reference is left alone.
    pub fn into_changes(self) -> AppointmentChanges {
        AppointmentChanges {
            prospect_id: Some(self.prospect_id),
            rep_id: Some(self.rep_id),
            date: Some(self.date),
            start_time: Some(self.start_time),
            duration_minutes: Some(self.duration_minutes),
            place: Some(self.place),
            notes: Some(self.notes),
            external_ref: None,
            status: self.status,
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, SchedulingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SchedulingError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", value))
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, SchedulingError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            SchedulingError::Validation(format!("invalid start time '{}', expected HH:MM", value))
        })
}

fn required(value: &str, name: &str) -> Result<String, SchedulingError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SchedulingError::Validation(format!("{} is required", name)));
    }
    Ok(value.to_string())
}

/// Check every field a booking needs.
pub fn validate_fields(fields: AppointmentFields) -> Result<ValidatedAppointment, SchedulingError> {
    let rep_id = required(&fields.rep_id, "rep_id")?;
    let prospect_id = required(&fields.prospect_id, "prospect_id")?;
    let date = parse_date(&fields.date)?;
    let start_time = parse_time(&fields.start_time)?;

    if !is_allowed_duration(fields.duration_minutes) {
        return Err(SchedulingError::Validation(format!(
            "duration of {} minutes is not one of {:?}",
            fields.duration_minutes, ALLOWED_DURATIONS
        )));
    }

    Ok(ValidatedAppointment {
        id: fields.id,
        prospect_id,
        rep_id,
        date,
        start_time,
        duration_minutes: fields.duration_minutes,
        place: fields.place.filter(|p| !p.trim().is_empty()),
        notes: fields.notes.filter(|n| !n.trim().is_empty()),
        status: fields.status,
    })
}
