// --- File: crates/repcal_scheduling/src/engine.rs ---
//! Entry points of the availability and booking engine.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use repcal_common::models::ExternalCredentials;
use repcal_common::services::{AppointmentStore, ExternalCalendarSource};
use repcal_config::SchedulingConfig;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::aggregator::{BusyIntervalAggregator, ExternalSourceStatus};
use crate::booking::{BookingCoordinator, BookingOutcome};
use crate::error::SchedulingError;
use crate::gate::RequestTicket;
use crate::interval::exists_locally;
use crate::slots::calculate_free_slots;
use crate::validation::AppointmentFields;

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub rep_id: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    /// Appointment being edited; its own slot must not block itself.
    pub exclude_appointment_id: Option<i64>,
    pub credentials: Option<ExternalCredentials>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityResult {
    pub date: NaiveDate,
    pub duration_minutes: u32,
    /// Free starts, ascending, on quarter-hour boundaries.
    pub slots: Vec<NaiveTime>,
    pub external: ExternalSourceStatus,
}

/// Resolve the configured working timezone.
pub fn parse_time_zone(name: &str) -> Result<Tz, SchedulingError> {
    Tz::from_str(name)
        .map_err(|_| SchedulingError::Validation(format!("unknown time zone '{}'", name)))
}

pub struct AvailabilityEngine<S, C> {
    aggregator: BusyIntervalAggregator<S, C>,
    coordinator: BookingCoordinator<S, C>,
    time_zone: Tz,
}

impl<S, C> Clone for AvailabilityEngine<S, C> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
            coordinator: self.coordinator.clone(),
            time_zone: self.time_zone,
        }
    }
}

impl<S, C> AvailabilityEngine<S, C>
where
    S: AppointmentStore,
    C: ExternalCalendarSource,
{
    pub fn new(store: Arc<S>, calendar: Option<Arc<C>>, time_zone: Tz) -> Self {
        Self {
            aggregator: BusyIntervalAggregator::new(store.clone(), calendar.clone(), time_zone),
            coordinator: BookingCoordinator::new(store, calendar, time_zone),
            time_zone,
        }
    }

    pub fn from_config(
        config: &SchedulingConfig,
        store: Arc<S>,
        calendar: Option<Arc<C>>,
    ) -> Result<Self, SchedulingError> {
        let time_zone = parse_time_zone(&config.time_zone)?;
        Ok(Self::new(store, calendar, time_zone))
    }

    /// Free slots of a rep on a day for the requested duration.
    ///
    /// Works without the external calendar; only a local store failure is
    /// an error. Starts that fall in a DST gap of the working zone are left out.
    pub async fn compute_availability(
        &self,
        request: AvailabilityRequest,
    ) -> Result<AvailabilityResult, SchedulingError> {
        if request.rep_id.trim().is_empty() {
            return Err(SchedulingError::Validation("rep_id is required".to_string()));
        }
        if request.duration_minutes == 0 || request.duration_minutes > MINUTES_PER_DAY {
            return Err(SchedulingError::Validation(format!(
                "duration must be between 1 and {} minutes, got {}",
                MINUTES_PER_DAY, request.duration_minutes
            )));
        }

        let busy = self
            .aggregator
            .gather(
                &request.rep_id,
                request.date,
                request.exclude_appointment_id,
                request.credentials.as_ref(),
            )
            .await?;

        let mut slots =
            calculate_free_slots(&busy.intervals, request.date, request.duration_minutes);
        // Starts skipped by a spring-forward are not real times.
        slots.retain(|slot| exists_locally(self.time_zone, request.date.and_time(*slot)));
        debug!(
            "{} free {}-minute slots for rep {} on {}",
            slots.len(),
            request.duration_minutes,
            request.rep_id,
            request.date
        );

        Ok(AvailabilityResult {
            date: request.date,
            duration_minutes: request.duration_minutes,
            slots,
            external: busy.external,
        })
    }

    /// [`compute_availability`](Self::compute_availability) whose result is
    /// dropped if `ticket` was superseded before it was ready.
    pub async fn compute_availability_latest(
        &self,
        ticket: &RequestTicket,
        request: AvailabilityRequest,
    ) -> Result<AvailabilityResult, SchedulingError> {
        ticket.ensure_current()?;
        let result = self.compute_availability(request).await?;
        ticket.ensure_current()?;
        Ok(result)
    }

    pub async fn book(
        &self,
        fields: AppointmentFields,
        credentials: Option<ExternalCredentials>,
    ) -> BookingOutcome {
        self.coordinator.book(fields, credentials).await
    }
}
