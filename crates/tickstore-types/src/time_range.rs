//! Closed time ranges and minute bucketing.

use chrono::{DateTime, TimeDelta, Utc};

use crate::TimeRangeError;

/// Milliseconds in one candle bucket.
pub const MINUTE_MILLIS: i64 = 60_000;

/// A closed time interval `[start, end]` used to select stored ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Start timestamp (inclusive).
    pub start: DateTime<Utc>,
    /// End timestamp (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new time range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeRangeError> {
        if start > end {
            return Err(TimeRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range covering exactly one timestamp.
    #[must_use]
    pub const fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// Returns true if the range contains the given timestamp (both ends inclusive).
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Returns the start bound in epoch milliseconds.
    #[must_use]
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// Returns the end bound in epoch milliseconds.
    #[must_use]
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Floors an epoch-millisecond value to the start of its minute.
///
/// Uses euclidean remainder so values before 1970 floor towards the past,
/// matching the expression the store evaluates in SQL.
#[must_use]
pub const fn truncate_millis_to_minute(millis: i64) -> i64 {
    millis - millis.rem_euclid(MINUTE_MILLIS)
}

/// Truncates a timestamp to the start of its containing minute.
///
/// Seconds and all sub-second components are dropped.
#[must_use]
pub fn truncate_to_minute(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let millis = timestamp.timestamp_millis();
    let sub_milli_nanos = i64::from(timestamp.timestamp_subsec_nanos() % 1_000_000);
    timestamp
        - TimeDelta::milliseconds(millis.rem_euclid(MINUTE_MILLIS))
        - TimeDelta::nanoseconds(sub_milli_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 5, 18, h, m, s).unwrap()
    }

    #[test]
    fn test_time_range_new() {
        let range = TimeRange::new(at(14, 4, 0), at(14, 4, 59)).unwrap();
        assert_eq!(range.start, at(14, 4, 0));
        assert_eq!(range.end, at(14, 4, 59));
    }

    #[test]
    fn test_time_range_inverted() {
        assert!(TimeRange::new(at(14, 5, 0), at(14, 4, 0)).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange::new(at(14, 4, 0), at(14, 4, 59)).unwrap();
        assert!(range.contains(at(14, 4, 0)));
        assert!(range.contains(at(14, 4, 59)));
        assert!(!range.contains(at(14, 5, 0)));
    }

    #[test]
    fn test_truncate_to_minute() {
        let ts = at(14, 4, 59) + TimeDelta::nanoseconds(999_999_999);
        let bucket = truncate_to_minute(ts);
        assert_eq!(bucket, at(14, 4, 0));
        assert_eq!(bucket.nanosecond(), 0);
    }

    #[test]
    fn test_minute_boundary_belongs_to_next_bucket() {
        assert_eq!(truncate_to_minute(at(14, 5, 0)), at(14, 5, 0));
    }

    #[test]
    fn test_truncate_before_epoch_floors() {
        assert_eq!(truncate_millis_to_minute(-1), -60_000);
        assert_eq!(truncate_millis_to_minute(-60_000), -60_000);
        let ts = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 30).unwrap();
        assert_eq!(
            truncate_to_minute(ts),
            Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 0).unwrap()
        );
    }
}
