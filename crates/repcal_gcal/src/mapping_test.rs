#[cfg(test)]
mod tests {
    use crate::mapping::{event_from_api, event_to_api};
    use chrono::{NaiveDate, TimeZone, Utc};
    use google_calendar3::api::{Event, EventDateTime};
    use repcal_common::models::{EventTime, ExternalEventPayload};

    fn timed(hour: u32) -> EventDateTime {
        EventDateTime {
            date_time: Some(Utc.with_ymd_and_hms(2025, 5, 5, hour, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn all_day(day: u32) -> EventDateTime {
        EventDateTime {
            date: NaiveDate::from_ymd_opt(2025, 5, day),
            ..Default::default()
        }
    }

    #[test]
    fn test_timed_event_maps_fields() {
        let event = Event {
            id: Some("evt-1".to_string()),
            summary: Some("Team sync".to_string()),
            location: Some("Room 4".to_string()),
            start: Some(timed(8)),
            end: Some(timed(9)),
            ..Default::default()
        };

        let mapped = event_from_api(event).unwrap();
        assert_eq!(mapped.id, "evt-1");
        assert_eq!(
            mapped.start,
            EventTime::At(Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap())
        );
        assert_eq!(
            mapped.end,
            Some(EventTime::At(Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap()))
        );
        assert_eq!(mapped.title.as_deref(), Some("Team sync"));
        assert_eq!(mapped.location.as_deref(), Some("Room 4"));
    }

    #[test]
    fn test_all_day_event_maps_to_dates() {
        let event = Event {
            id: Some("holiday".to_string()),
            start: Some(all_day(5)),
            end: Some(all_day(6)),
            ..Default::default()
        };

        let mapped = event_from_api(event).unwrap();
        assert_eq!(
            mapped.start,
            EventTime::AllDay(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap())
        );
        assert_eq!(
            mapped.end,
            Some(EventTime::AllDay(NaiveDate::from_ymd_opt(2025, 5, 6).unwrap()))
        );
    }

    #[test]
    fn test_cancelled_and_incomplete_events_are_skipped() {
        let cancelled = Event {
            id: Some("evt-2".to_string()),
            status: Some("cancelled".to_string()),
            start: Some(timed(8)),
            end: Some(timed(9)),
            ..Default::default()
        };
        assert!(event_from_api(cancelled).is_none());

        let no_id = Event {
            start: Some(timed(8)),
            ..Default::default()
        };
        assert!(event_from_api(no_id).is_none());

        let no_start = Event {
            id: Some("evt-3".to_string()),
            start: Some(EventDateTime::default()),
            ..Default::default()
        };
        assert!(event_from_api(no_start).is_none());
    }

    #[test]
    fn test_payload_is_sent_in_utc() {
        let payload = ExternalEventPayload {
            summary: "Appointment: prospect-1".to_string(),
            description: Some("Bring the contract".to_string()),
            start: Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 5, 5, 8, 30, 0).unwrap(),
            location: None,
        };

        let event = event_to_api(payload);
        let start = event.start.unwrap();
        assert_eq!(start.time_zone.as_deref(), Some("UTC"));
        assert_eq!(
            start.date_time,
            Some(Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap())
        );
        assert_eq!(event.summary.as_deref(), Some("Appointment: prospect-1"));
        assert_eq!(event.location, None);
    }
}
