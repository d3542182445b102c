#[cfg(test)]
mod tests {
    use crate::error::SchedulingError;
    use crate::interval::{exists_locally, local_to_utc, merge_intervals, utc_to_local, TimeInterval};
    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
    use chrono_tz::Tz;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn interval(from: (u32, u32), to: (u32, u32)) -> TimeInterval {
        TimeInterval::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_inverted() {
        assert!(matches!(
            TimeInterval::new(at(10, 0), at(10, 0)),
            Err(SchedulingError::InvalidInterval { .. })
        ));
        assert!(TimeInterval::new(at(11, 0), at(10, 0)).is_err());
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let busy = interval((10, 0), (10, 30));
        assert!(!busy.overlaps(&interval((9, 30), (10, 0))));
        assert!(!busy.overlaps(&interval((10, 30), (11, 0))));
        assert!(busy.overlaps(&interval((9, 45), (10, 15))));
        assert!(busy.overlaps(&interval((10, 10), (10, 20))));
    }

    #[test]
    fn test_merge_coalesces_overlapping_and_touching() {
        let merged = merge_intervals(&[
            interval((13, 0), (14, 0)),
            interval((9, 0), (10, 0)),
            interval((9, 30), (11, 0)),
            interval((11, 0), (11, 15)),
        ]);
        assert_eq!(
            merged,
            vec![interval((9, 0), (11, 15)), interval((13, 0), (14, 0))]
        );
        assert!(merge_intervals(&[]).is_empty());
    }

    #[test]
    fn test_whole_day_spans_midnight_to_midnight() {
        let day = TimeInterval::whole_day(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
        assert_eq!(day.start(), at(0, 0));
        assert_eq!(
            day.end(),
            NaiveDate::from_ymd_opt(2025, 5, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_zurich_conversion_follows_summer_time() {
        let tz = Tz::Europe__Zurich;
        // CEST is UTC+2
        assert_eq!(
            local_to_utc(tz, at(10, 0)),
            Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap()
        );
        assert_eq!(
            utc_to_local(tz, Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap()),
            at(10, 0)
        );
    }

    #[test]
    fn test_time_in_dst_gap_moves_forward() {
        let tz = Tz::Europe__Zurich;
        let in_gap = NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        // 03:30 CEST
        assert_eq!(
            local_to_utc(tz, in_gap),
            Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_spring_forward_gap_does_not_exist_locally() {
        let tz = Tz::Europe__Zurich;
        let spring = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let fall = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();

        assert!(exists_locally(tz, spring.and_hms_opt(1, 45, 0).unwrap()));
        assert!(!exists_locally(tz, spring.and_hms_opt(2, 0, 0).unwrap()));
        assert!(!exists_locally(tz, spring.and_hms_opt(2, 45, 0).unwrap()));
        assert!(exists_locally(tz, spring.and_hms_opt(3, 0, 0).unwrap()));
        // ambiguous, but it exists
        assert!(exists_locally(tz, fall.and_hms_opt(2, 30, 0).unwrap()));
        assert!(exists_locally(tz, at(10, 0)));
    }
}
