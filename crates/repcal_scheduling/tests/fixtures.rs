//! Test fixtures for the scheduling engine
//!
//! In-memory stand-ins for the local appointment store and the external
//! calendar, with call counters and failure switches.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use repcal_common::models::{
    AppointmentChanges, AppointmentRecord, AppointmentStatus, ExternalCredentials, ExternalEvent,
    ExternalEventPayload, ExternalEventRef, NewAppointment,
};
use repcal_common::services::{AppointmentStore, BoxFuture, ExternalCalendarSource};
use repcal_scheduling::{AppointmentFields, AvailabilityEngine, AvailabilityRequest};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct FakeError(pub String);

/// In-memory appointment store.
#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<AppointmentRecord>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_updates: AtomicBool,
    list_delay: Mutex<Option<Duration>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(records: Vec<AppointmentRecord>) -> Arc<Self> {
        let store = Self::default();
        *store.records.lock().unwrap() = records;
        Arc::new(store)
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    pub fn records(&self) -> Vec<AppointmentRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst) + self.update_calls.load(Ordering::SeqCst)
    }
}

impl AppointmentStore for FakeStore {
    type Error = FakeError;

    fn list(&self, rep_id: &str, date: NaiveDate) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        let rep_id = rep_id.to_string();
        Box::pin(async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.list_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(FakeError("appointment store is offline".to_string()));
            }
            let mut records: Vec<_> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.rep_id == rep_id && r.date == date)
                .cloned()
                .collect();
            records.sort_by_key(|r| r.start_time);
            Ok(records)
        })
    }

    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(FakeError("disk full".to_string()));
            }
            let mut records = self.records.lock().unwrap();
            let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let record = AppointmentRecord {
                id,
                prospect_id: appointment.prospect_id,
                rep_id: appointment.rep_id,
                date: appointment.date,
                start_time: appointment.start_time,
                duration_minutes: appointment.duration_minutes,
                place: appointment.place,
                notes: appointment.notes,
                external_ref: None,
                status: appointment.status,
            };
            records.push(record.clone());
            Ok(record)
        })
    }

    fn update(&self, id: i64, changes: AppointmentChanges) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) || self.fail_updates.load(Ordering::SeqCst) {
                return Err(FakeError("disk full".to_string()));
            }
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| FakeError(format!("Appointment {} not found", id)))?;
            changes.apply_to(record);
            Ok(record.clone())
        })
    }
}

/// In-memory external calendar.
#[derive(Default)]
pub struct FakeCalendar {
    events: Mutex<Vec<ExternalEvent>>,
    pub payloads: Mutex<Vec<ExternalEventPayload>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeCalendar {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_events(events: Vec<ExternalEvent>) -> Arc<Self> {
        let calendar = Self::default();
        *calendar.events.lock().unwrap() = events;
        Arc::new(calendar)
    }

    pub fn failing() -> Arc<Self> {
        let calendar = Self::default();
        calendar.fail.store(true, Ordering::SeqCst);
        Arc::new(calendar)
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
            + self.create_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
    }

    fn check(&self, credentials: &ExternalCredentials) -> Result<(), FakeError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(FakeError("Google API Error: 503 Service Unavailable".to_string()));
        }
        if credentials.access_token != TOKEN {
            return Err(FakeError("Google API Error: 401 Unauthorized".to_string()));
        }
        Ok(())
    }
}

impl ExternalCalendarSource for FakeCalendar {
    type Error = FakeError;

    fn list_events(
        &self,
        credentials: &ExternalCredentials,
        _time_min: DateTime<Utc>,
        _time_max: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<ExternalEvent>, Self::Error> {
        let checked = self.check(credentials);
        Box::pin(async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            checked?;
            Ok(self.events.lock().unwrap().clone())
        })
    }

    fn create_event(
        &self,
        credentials: &ExternalCredentials,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error> {
        let checked = self.check(credentials);
        Box::pin(async move {
            let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
            checked?;
            self.payloads.lock().unwrap().push(payload);
            Ok(ExternalEventRef {
                id: format!("evt-{}", n),
            })
        })
    }

    fn update_event(
        &self,
        credentials: &ExternalCredentials,
        event_id: &str,
        payload: ExternalEventPayload,
    ) -> BoxFuture<'_, ExternalEventRef, Self::Error> {
        let checked = self.check(credentials);
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            checked?;
            self.payloads.lock().unwrap().push(payload);
            Ok(ExternalEventRef { id: event_id })
        })
    }
}

pub const TOKEN: &str = "ya29.valid-token";
pub const REP: &str = "rep-1";

pub fn zurich() -> Tz {
    Tz::Europe__Zurich
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn credentials() -> ExternalCredentials {
    ExternalCredentials::new(TOKEN)
}

pub fn record(id: i64, hour: u32, minute: u32, duration_minutes: u32) -> AppointmentRecord {
    AppointmentRecord {
        id,
        prospect_id: format!("prospect-{}", id),
        rep_id: REP.to_string(),
        date: day(),
        start_time: time(hour, minute),
        duration_minutes,
        place: None,
        notes: None,
        external_ref: None,
        status: AppointmentStatus::Scheduled,
    }
}

pub fn fields(hour: u32, minute: u32, duration_minutes: u32) -> AppointmentFields {
    AppointmentFields {
        id: None,
        prospect_id: "prospect-42".to_string(),
        rep_id: REP.to_string(),
        date: "2025-05-05".to_string(),
        start_time: format!("{:02}:{:02}", hour, minute),
        duration_minutes,
        place: Some("Bahnhofstrasse 1, Zurich".to_string()),
        notes: Some("Bring the contract".to_string()),
        status: None,
    }
}

pub fn request(duration_minutes: u32) -> AvailabilityRequest {
    AvailabilityRequest {
        rep_id: REP.to_string(),
        date: day(),
        duration_minutes,
        exclude_appointment_id: None,
        credentials: None,
    }
}

pub fn engine(
    store: &Arc<FakeStore>,
    calendar: Option<&Arc<FakeCalendar>>,
) -> AvailabilityEngine<FakeStore, FakeCalendar> {
    AvailabilityEngine::new(store.clone(), calendar.cloned(), zurich())
}
