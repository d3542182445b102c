//! Conversions between Google Calendar API events and the engine's models.

use google_calendar3::api::{Event, EventDateTime};
use repcal_common::models::{EventTime, ExternalEvent, ExternalEventPayload};
use tracing::debug;

const CANCELLED: &str = "cancelled";

fn event_time(value: &EventDateTime) -> Option<EventTime> {
    // A timed boundary wins if Google sends both
    if let Some(at) = value.date_time {
        return Some(EventTime::At(at));
    }
    value.date.map(EventTime::AllDay)
}

/// Map an API event to an [`ExternalEvent`].
///
/// Returns `None` for cancelled events and for events without an id or a
/// usable start; those cannot block time.
pub fn event_from_api(event: Event) -> Option<ExternalEvent> {
    if event.status.as_deref() == Some(CANCELLED) {
        return None;
    }

    let id = event.id?;
    let start = match event.start.as_ref().and_then(event_time) {
        Some(start) => start,
        None => {
            debug!("Skipping event {} without a start", id);
            return None;
        }
    };

    Some(ExternalEvent {
        id,
        start,
        end: event.end.as_ref().and_then(event_time),
        title: event.summary,
        location: event.location,
        description: event.description,
    })
}

/// Build the API event body for a create or patch call.
///
/// Times are sent in UTC.
pub fn event_to_api(payload: ExternalEventPayload) -> Event {
    Event {
        summary: Some(payload.summary),
        description: payload.description,
        location: payload.location,
        start: Some(EventDateTime {
            date_time: Some(payload.start),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(payload.end),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
