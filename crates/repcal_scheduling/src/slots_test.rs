#[cfg(test)]
mod tests {
    use crate::interval::TimeInterval;
    use crate::slots::{calculate_free_slots, SLOTS_PER_DAY};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_empty_day_offers_every_quarter_hour() {
        let slots = calculate_free_slots(&[], day(), 15);
        assert_eq!(slots.len() as u32, SLOTS_PER_DAY);
        assert_eq!(slots.first(), Some(&time(0, 0)));
        assert_eq!(slots.last(), Some(&time(23, 45)));
    }

    #[test]
    fn test_half_hour_booking_at_ten() {
        let busy = [TimeInterval::new(at(10, 0), at(10, 30)).unwrap()];
        let slots = calculate_free_slots(&busy, day(), 30);

        assert!(slots.contains(&time(9, 30)));
        assert!(slots.contains(&time(10, 30)));
        assert!(!slots.contains(&time(9, 45)));
        assert!(!slots.contains(&time(10, 0)));
        assert!(!slots.contains(&time(10, 15)));
    }

    #[test]
    fn test_slot_may_end_exactly_at_midnight() {
        let slots = calculate_free_slots(&[], day(), 60);
        assert_eq!(slots.last(), Some(&time(23, 0)));
        assert!(!slots.contains(&time(23, 15)));
    }

    #[test]
    fn test_busy_interval_from_previous_day_blocks_morning() {
        let previous_evening = NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        let busy = [TimeInterval::new(previous_evening, at(1, 0)).unwrap()];
        let slots = calculate_free_slots(&busy, day(), 15);
        assert_eq!(slots.first(), Some(&time(1, 0)));
    }

    #[test]
    fn test_fully_booked_day_is_empty_not_an_error() {
        let busy = [TimeInterval::whole_day(day())];
        assert!(calculate_free_slots(&busy, day(), 15).is_empty());
    }

    #[test]
    fn test_longer_than_a_day_yields_nothing() {
        assert!(calculate_free_slots(&[], day(), 24 * 60 + 15).is_empty());
        assert_eq!(calculate_free_slots(&[], day(), 24 * 60), vec![time(0, 0)]);
    }

    #[test]
    fn test_unsorted_overlapping_input() {
        let busy = [
            TimeInterval::new(at(14, 0), at(15, 0)).unwrap(),
            TimeInterval::new(at(9, 0), at(12, 0)).unwrap(),
            TimeInterval::new(at(11, 0), at(13, 0)).unwrap(),
        ];
        let slots = calculate_free_slots(&busy, day(), 60);
        assert!(slots.contains(&time(8, 0)));
        assert!(!slots.contains(&time(8, 15)));
        assert!(slots.contains(&time(13, 0)));
        assert!(!slots.contains(&time(13, 15)));
        assert!(slots.contains(&time(15, 0)));
    }
}
