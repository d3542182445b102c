#[cfg(test)]
mod tests {
    use crate::interval::TimeInterval;
    use crate::slots::{calculate_free_slots, SLOT_GRANULARITY_MINUTES, SLOTS_PER_DAY};
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn midnight() -> NaiveDateTime {
        day().and_hms_opt(0, 0, 0).unwrap()
    }

    // Busy intervals as (start offset, length) in minutes from midnight
    fn busy_strategy() -> impl Strategy<Value = Vec<TimeInterval>> {
        prop::collection::vec((0..1440i64, 1..240i64), 0..8).prop_map(|raw| {
            raw.into_iter()
                .map(|(offset, length)| {
                    let start = midnight() + Duration::minutes(offset);
                    TimeInterval::new(start, start + Duration::minutes(length)).unwrap()
                })
                .collect()
        })
    }

    // Disjoint quarter-aligned bookings laid out left to right as
    // (gap, length) in quarter hours, with the total booked quarters
    fn aligned_bookings_strategy() -> impl Strategy<Value = (Vec<TimeInterval>, u32)> {
        prop::collection::vec((0u32..12, 1u32..=8), 0..12).prop_map(|raw| {
            let mut busy = Vec::new();
            let mut booked = 0;
            let mut next_quarter = 0;
            for (gap, length) in raw {
                let start_quarter = next_quarter + gap;
                if start_quarter + length > SLOTS_PER_DAY {
                    break;
                }
                let start = midnight() + Duration::minutes(i64::from(start_quarter * SLOT_GRANULARITY_MINUTES));
                busy.push(TimeInterval::from_minutes(start, length * SLOT_GRANULARITY_MINUTES).unwrap());
                booked += length;
                next_quarter = start_quarter + length;
            }
            (busy, booked)
        })
    }

    // Checks every candidate against every interval, no merging
    fn brute_force_free_slots(busy: &[TimeInterval], duration_minutes: u32) -> Vec<NaiveTime> {
        let day_end = midnight() + Duration::days(1);
        (0..SLOTS_PER_DAY)
            .map(|quarter| midnight() + Duration::minutes(i64::from(quarter * SLOT_GRANULARITY_MINUTES)))
            .filter(|start| {
                let end = *start + Duration::minutes(i64::from(duration_minutes));
                end <= day_end
                    && busy
                        .iter()
                        .all(|interval| interval.end() <= *start || interval.start() >= end)
            })
            .map(|start| start.time())
            .collect()
    }

    proptest! {
        // A single quarter-hour-aligned booking of N quarter hours removes
        // exactly N 15-minute slots.
        #[test]
        fn test_aligned_booking_removes_its_own_quarters(
            start_quarter in 0u32..96,
            quarters in 1u32..=8,
        ) {
            prop_assume!(start_quarter + quarters <= SLOTS_PER_DAY);
            let start = midnight() + Duration::minutes(i64::from(start_quarter * SLOT_GRANULARITY_MINUTES));
            let busy = [TimeInterval::from_minutes(start, quarters * SLOT_GRANULARITY_MINUTES).unwrap()];

            let slots = calculate_free_slots(&busy, day(), SLOT_GRANULARITY_MINUTES);
            prop_assert_eq!(slots.len() as u32, SLOTS_PER_DAY - quarters);
        }

        #[test]
        fn test_disjoint_aligned_bookings_remove_their_quarters(
            (busy, booked) in aligned_bookings_strategy(),
        ) {
            let slots = calculate_free_slots(&busy, day(), SLOT_GRANULARITY_MINUTES);
            prop_assert_eq!(slots.len() as u32, SLOTS_PER_DAY - booked);
        }

        #[test]
        fn test_matches_brute_force_scan(
            busy in busy_strategy(),
            duration in 1u32..=240,
        ) {
            prop_assert_eq!(
                calculate_free_slots(&busy, day(), duration),
                brute_force_free_slots(&busy, duration)
            );
        }

        #[test]
        fn test_no_slot_overlaps_any_busy_interval(
            busy in busy_strategy(),
            duration in prop::sample::select(vec![15u32, 30, 45, 60, 90, 120]),
        ) {
            for slot in calculate_free_slots(&busy, day(), duration) {
                let candidate = TimeInterval::from_minutes(day().and_time(slot), duration).unwrap();
                prop_assert!(slot.minute() % SLOT_GRANULARITY_MINUTES == 0);
                prop_assert!(candidate.end() <= midnight() + Duration::days(1));
                for interval in &busy {
                    prop_assert!(!candidate.overlaps(interval), "{:?} overlaps {:?}", candidate, interval);
                }
            }
        }

        #[test]
        fn test_result_is_ascending_and_idempotent(
            busy in busy_strategy(),
            duration in 1u32..=180,
        ) {
            let first = calculate_free_slots(&busy, day(), duration);
            let second = calculate_free_slots(&busy, day(), duration);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
        }

        #[test]
        fn test_input_order_does_not_matter(
            busy in busy_strategy(),
            duration in 1u32..=180,
        ) {
            let mut reversed = busy.clone();
            reversed.reverse();
            prop_assert_eq!(
                calculate_free_slots(&busy, day(), duration),
                calculate_free_slots(&reversed, day(), duration)
            );
        }
    }
}
