// --- File: crates/repcal_scheduling/src/slots.rs ---
use chrono::{Duration, NaiveDate, NaiveTime};

use crate::interval::{merge_intervals, TimeInterval};

/// Step between candidate slot starts, in minutes.
pub const SLOT_GRANULARITY_MINUTES: u32 = 15;

/// Candidate starts per day at the fixed granularity.
pub const SLOTS_PER_DAY: u32 = 24 * 60 / SLOT_GRANULARITY_MINUTES;

/// Every quarter-hour start on `date` whose `[start, start + duration)` is
/// clear of all `busy` intervals, ascending.
///
/// `busy` may be unsorted, overlapping and may extend past the day. Slots
/// that would run past midnight are not offered; one ending exactly at
/// 24:00 is.
pub fn calculate_free_slots(
    busy: &[TimeInterval],
    date: NaiveDate,
    duration_minutes: u32,
) -> Vec<NaiveTime> {
    let day = TimeInterval::whole_day(date);
    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(i64::from(SLOT_GRANULARITY_MINUTES));

    // Merged intervals are sorted and disjoint, so one cursor suffices.
    let merged = merge_intervals(busy);
    let mut cursor = 0;
    let mut free = Vec::new();

    let mut slot_start = day.start();
    while slot_start < day.end() {
        let slot_end = slot_start + duration;
        if slot_end > day.end() {
            break;
        }

        while cursor < merged.len() && merged[cursor].end() <= slot_start {
            cursor += 1;
        }
        let conflict = merged
            .get(cursor)
            .is_some_and(|busy| busy.start() < slot_end && busy.end() > slot_start);

        if !conflict {
            free.push(slot_start.time());
        }
        slot_start += step;
    }
    free
}
