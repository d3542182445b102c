// --- File: crates/repcal_scheduling/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use repcal_common::services::{AppointmentStore, ExternalCalendarSource};
use std::sync::Arc;

use crate::engine::AvailabilityEngine;
use crate::handlers::{book_appointment_handler, get_availability_handler, SchedulingState};

/// Creates a router containing the availability and booking routes.
pub fn routes<S, C>(engine: AvailabilityEngine<S, C>) -> Router
where
    S: AppointmentStore + 'static,
    C: ExternalCalendarSource + 'static,
{
    let state = Arc::new(SchedulingState { engine });

    Router::new()
        .route("/availability", get(get_availability_handler::<S, C>))
        .route("/appointments", post(book_appointment_handler::<S, C>))
        .with_state(state)
}
