// File: crates/repcal_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::aggregator::ExternalSourceStatus;
use crate::booking::{
    BookingFailure, BookingOutcome, BookingState, BookingStatus, FailureKind, SyncIssue,
};
use crate::handlers::{AvailabilityResponse, BookAppointmentRequest};
use crate::validation::AppointmentFields;
use repcal_common::models::{AppointmentRecord, AppointmentStatus, ExternalCredentials};

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("rep_id" = String, Query, description = "Representative id", example = "rep-1"),
        ("date" = String, Query, description = "Day in YYYY-MM-DD format", example = "2025-05-05", format = "date"),
        ("duration_minutes" = u32, Query, description = "Requested duration in minutes", example = 30),
        ("exclude_appointment_id" = Option<i64>, Query, description = "Appointment being edited"),
        ("X-Calendar-Access-Token" = Option<String>, Header, description = "Rep's external calendar access token"),
        ("X-Calendar-Refresh-Token" = Option<String>, Header, description = "Rep's external calendar refresh token")
    ),
    responses(
        (status = 200, description = "Free start times", body = AvailabilityResponse,
         example = json!({
             "date": "2025-05-05",
             "duration_minutes": 30,
             "slots": ["09:00", "09:15", "09:30", "10:30"],
             "external": { "status": "not_connected" }
         })
        ),
        (status = 400, description = "Invalid rep, date or duration"),
        (status = 500, description = "Local appointment store failed")
    ),
    tag = "Scheduling"
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body(content = BookAppointmentRequest, example = json!({
        "appointment": {
            "prospect_id": "prospect-42",
            "rep_id": "rep-1",
            "date": "2025-05-05",
            "start_time": "10:00",
            "duration_minutes": 30,
            "place": "Bahnhofstrasse 1, Zurich",
            "notes": "Bring the contract"
        },
        "credentials": { "access_token": "ya29..." }
    })),
    responses(
        (status = 200, description = "Booked, possibly without calendar sync", body = BookingOutcome),
        (status = 400, description = "Validation failed, nothing was written", body = BookingOutcome),
        (status = 500, description = "Local appointment store failed", body = BookingOutcome)
    ),
    tag = "Scheduling"
)]
fn doc_book_appointment_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_get_availability_handler, doc_book_appointment_handler),
    components(schemas(
        AvailabilityResponse,
        ExternalSourceStatus,
        BookAppointmentRequest,
        AppointmentFields,
        ExternalCredentials,
        BookingOutcome,
        BookingStatus,
        BookingState,
        BookingFailure,
        FailureKind,
        SyncIssue,
        AppointmentRecord,
        AppointmentStatus
    )),
    tags((name = "Scheduling", description = "Availability and booking API"))
)]
pub struct SchedulingApiDoc;
