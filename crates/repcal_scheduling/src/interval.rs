// --- File: crates/repcal_scheduling/src/interval.rs ---
//! Half-open busy intervals on the working-timezone wall clock.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::SchedulingError;

/// A `[start, end)` range of wall-clock time. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, SchedulingError> {
        if start >= end {
            return Err(SchedulingError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Interval of `minutes` length beginning at `start`.
    pub fn from_minutes(start: NaiveDateTime, minutes: u32) -> Result<Self, SchedulingError> {
        Self::new(start, start + Duration::minutes(i64::from(minutes)))
    }

    /// The whole of `date`, midnight to midnight.
    pub fn whole_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Half-open overlap: touching intervals do not conflict.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Sort and coalesce overlapping or touching intervals.
///
/// The union of the output equals the union of the input.
pub fn merge_intervals(busy: &[TimeInterval]) -> Vec<TimeInterval> {
    if busy.is_empty() {
        return vec![];
    }
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Resolve a wall-clock time in `tz` to UTC.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap are moved forward by the gap, as a wall clock would be.
pub fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz.from_local_datetime(&(local + Duration::hours(1))).earliest(),
    };
    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// False for wall-clock times skipped by a DST spring-forward in `tz`.
pub fn exists_locally(tz: Tz, local: NaiveDateTime) -> bool {
    !matches!(tz.from_local_datetime(&local), LocalResult::None)
}

/// Wall-clock time in `tz` of a UTC instant.
pub fn utc_to_local(tz: Tz, instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}
