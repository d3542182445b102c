// --- File: crates/repcal_scheduling/src/aggregator.rs ---
//! Collects a rep's busy intervals for one day from the local store and,
//! when connected, the external calendar.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use repcal_common::models::{AppointmentRecord, EventTime, ExternalCredentials, ExternalEvent};
use repcal_common::services::{AppointmentStore, ExternalCalendarSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::SchedulingError;
use crate::interval::{local_to_utc, utc_to_local, TimeInterval};

/// Whether the external calendar contributed to a result.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ExternalSourceStatus {
    Included,
    /// No credentials were supplied or no calendar is configured.
    NotConnected,
    /// The calendar was asked but failed; only local data was used.
    Unavailable(String),
}

/// Busy intervals of one rep and day, unsorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyIntervals {
    pub intervals: Vec<TimeInterval>,
    pub external: ExternalSourceStatus,
}

pub struct BusyIntervalAggregator<S, C> {
    store: Arc<S>,
    calendar: Option<Arc<C>>,
    time_zone: Tz,
}

impl<S, C> Clone for BusyIntervalAggregator<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            calendar: self.calendar.clone(),
            time_zone: self.time_zone,
        }
    }
}

impl<S, C> BusyIntervalAggregator<S, C>
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

    /// Busy intervals of `rep_id` on `date`.
    ///
    /// Both sources are queried concurrently. A store failure fails the call;
    /// a calendar failure only downgrades the result to local data.
    pub async fn gather(
        &self,
        rep_id: &str,
        date: NaiveDate,
        exclude_appointment_id: Option<i64>,
        credentials: Option<&ExternalCredentials>,
    ) -> Result<BusyIntervals, SchedulingError> {
        let (local, external) = tokio::join!(
            self.store.list(rep_id, date),
            self.external_intervals(date, credentials)
        );

        let appointments = local.map_err(|e| SchedulingError::LocalStore(e.to_string()))?;
        let mut intervals = local_intervals(&appointments, exclude_appointment_id);
        debug!(
            "Rep {} has {} local busy intervals on {}",
            rep_id,
            intervals.len(),
            date
        );

        let status = match external {
            ExternalFetch::NotConnected => ExternalSourceStatus::NotConnected,
            ExternalFetch::Failed(message) => {
                warn!(
                    "External calendar unavailable for rep {} on {}, using local appointments only: {}",
                    rep_id, date, message
                );
                ExternalSourceStatus::Unavailable(message)
            }
            ExternalFetch::Fetched(events) => {
                // The edited appointment's own mirror must not block it either.
                let excluded_ref = excluded_external_ref(&appointments, exclude_appointment_id);
                intervals.extend(
                    events
                        .iter()
                        .filter(|event| Some(event.id.as_str()) != excluded_ref)
                        .filter_map(|event| external_interval(event, self.time_zone)),
                );
                ExternalSourceStatus::Included
            }
        };

        Ok(BusyIntervals {
            intervals,
            external: status,
        })
    }

    async fn external_intervals(
        &self,
        date: NaiveDate,
        credentials: Option<&ExternalCredentials>,
    ) -> ExternalFetch {
        let (calendar, credentials) = match (&self.calendar, credentials) {
            (Some(calendar), Some(credentials)) => (calendar, credentials),
            _ => return ExternalFetch::NotConnected,
        };

        let day = TimeInterval::whole_day(date);
        let time_min = local_to_utc(self.time_zone, day.start());
        let time_max = local_to_utc(self.time_zone, day.end());

        match calendar.list_events(credentials, time_min, time_max).await {
            Ok(events) => ExternalFetch::Fetched(events),
            Err(e) => ExternalFetch::Failed(e.to_string()),
        }
    }
}

enum ExternalFetch {
    NotConnected,
    Failed(String),
    Fetched(Vec<ExternalEvent>),
}

/// Intervals of the appointments that block time, minus the excluded one.
pub fn local_intervals(
    appointments: &[AppointmentRecord],
    exclude_appointment_id: Option<i64>,
) -> Vec<TimeInterval> {
    appointments
        .iter()
        .filter(|appointment| Some(appointment.id) != exclude_appointment_id)
        .filter(|appointment| appointment.status.blocks_time())
        .filter_map(|appointment| {
            TimeInterval::from_minutes(appointment.starts_at(), appointment.duration_minutes).ok()
        })
        .collect()
}

/// Calendar event id mirroring the excluded appointment, if it was synced.
pub fn excluded_external_ref(
    appointments: &[AppointmentRecord],
    exclude_appointment_id: Option<i64>,
) -> Option<&str> {
    let excluded = exclude_appointment_id?;
    appointments
        .iter()
        .find(|appointment| appointment.id == excluded)
        .and_then(|appointment| appointment.external_ref.as_deref())
}

/// Wall-clock interval of an external event in `time_zone`.
///
/// All-day events cover whole days (their end date is exclusive). Events
/// without a usable end are dropped.
pub fn external_interval(event: &ExternalEvent, time_zone: Tz) -> Option<TimeInterval> {
    let start = match event.start {
        EventTime::At(at) => utc_to_local(time_zone, at),
        EventTime::AllDay(date) => TimeInterval::whole_day(date).start(),
    };
    let end = match (event.start, event.end) {
        (_, Some(EventTime::At(at))) => utc_to_local(time_zone, at),
        (_, Some(EventTime::AllDay(date))) => TimeInterval::whole_day(date).start(),
        (EventTime::AllDay(_), None) => start + Duration::days(1),
        (EventTime::At(_), None) => {
            debug!("Ignoring external event {} without an end", event.id);
            return None;
        }
    };

    match TimeInterval::new(start, end) {
        Ok(interval) => Some(interval),
        Err(e) => {
            debug!("Ignoring external event {}: {}", event.id, e);
            None
        }
    }
}
