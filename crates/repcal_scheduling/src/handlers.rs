// File: crates/repcal_scheduling/src/handlers.rs
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use repcal_common::models::ExternalCredentials;
use repcal_common::services::{AppointmentStore, ExternalCalendarSource};
use repcal_common::RepcalError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::aggregator::ExternalSourceStatus;
use crate::booking::{BookingOutcome, FailureKind};
use crate::engine::{AvailabilityEngine, AvailabilityRequest};
use crate::validation::{parse_date, AppointmentFields};

pub const ACCESS_TOKEN_HEADER: &str = "x-calendar-access-token";
pub const REFRESH_TOKEN_HEADER: &str = "x-calendar-refresh-token";

// Shared state of the scheduling routes
pub struct SchedulingState<S, C> {
    pub engine: AvailabilityEngine<S, C>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub rep_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub duration_minutes: u32,
    pub exclude_appointment_id: Option<i64>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub duration_minutes: u32,
    /// Free start times as `HH:MM`
    pub slots: Vec<String>,
    pub external: ExternalSourceStatus,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
pub struct BookAppointmentRequest {
    pub appointment: AppointmentFields,
    #[serde(default)]
    pub credentials: Option<ExternalCredentials>,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Calendar credentials carried in the request headers, if any.
pub fn credentials_from_headers(headers: &HeaderMap) -> Option<ExternalCredentials> {
    header_value(headers, ACCESS_TOKEN_HEADER).map(|access_token| ExternalCredentials {
        access_token,
        refresh_token: header_value(headers, REFRESH_TOKEN_HEADER),
    })
}

/// Handler to get the free slots of a rep on one day.
pub async fn get_availability_handler<S, C>(
    State(state): State<Arc<SchedulingState<S, C>>>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, RepcalError>
where
    S: AppointmentStore + 'static,
    C: ExternalCalendarSource + 'static,
{
    let date = parse_date(&query.date)?;
    let request = AvailabilityRequest {
        rep_id: query.rep_id,
        date,
        duration_minutes: query.duration_minutes,
        exclude_appointment_id: query.exclude_appointment_id,
        credentials: credentials_from_headers(&headers),
    };

    let result = state.engine.compute_availability(request).await?;

    Ok(Json(AvailabilityResponse {
        date: result.date.format("%Y-%m-%d").to_string(),
        duration_minutes: result.duration_minutes,
        slots: result
            .slots
            .iter()
            .map(|slot| slot.format("%H:%M").to_string())
            .collect(),
        external: result.external,
    }))
}

/// Handler to create or update an appointment.
///
/// Credentials in the body take precedence over the headers.
pub async fn book_appointment_handler<S, C>(
    State(state): State<Arc<SchedulingState<S, C>>>,
    headers: HeaderMap,
    Json(payload): Json<BookAppointmentRequest>,
) -> (StatusCode, Json<BookingOutcome>)
where
    S: AppointmentStore + 'static,
    C: ExternalCalendarSource + 'static,
{
    let credentials = payload
        .credentials
        .filter(|credentials| !credentials.access_token.trim().is_empty())
        .or_else(|| credentials_from_headers(&headers));

    let outcome = state.engine.book(payload.appointment, credentials).await;
    info!("Booking finished with status {:?}", outcome.status);

    let status = match outcome.failure.as_ref().map(|failure| failure.kind) {
        None => StatusCode::OK,
        Some(FailureKind::Validation) => StatusCode::BAD_REQUEST,
        Some(FailureKind::LocalStore) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(outcome))
}
