//! Release facts: the numeric, non-boolean inputs of the engine.

use chrono::{DateTime, Months, Utc};

use crate::version::ParsedVersion;

/// Declared version plus release timestamps. Absent timestamps stay absent;
/// they are never defaulted to the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFacts {
    pub declared_version: ParsedVersion,
    pub first_release_at: Option<DateTime<Utc>>,
    pub most_recent_release_at: Option<DateTime<Utc>>,
    /// First release at or above the 1.0.0 boundary.
    pub first_major_release_at: Option<DateTime<Utc>>,
}

impl ReleaseFacts {
    /// Facts for a version string with no known release timestamps.
    pub fn new(declared_version: impl Into<ParsedVersion>) -> Self {
        Self {
            declared_version: declared_version.into(),
            first_release_at: None,
            most_recent_release_at: None,
            first_major_release_at: None,
        }
    }

    pub fn with_first_release(mut self, at: DateTime<Utc>) -> Self {
        self.first_release_at = Some(at);
        self
    }

    pub fn with_most_recent_release(mut self, at: DateTime<Utc>) -> Self {
        self.most_recent_release_at = Some(at);
        self
    }

    pub fn with_first_major_release(mut self, at: DateTime<Utc>) -> Self {
        self.first_major_release_at = Some(at);
        self
    }
}

impl From<ParsedVersion> for ReleaseFacts {
    fn from(version: ParsedVersion) -> Self {
        Self::new(version)
    }
}

/// `as_of` minus a whole number of calendar months.
///
/// Saturates at the earliest representable instant so the engine stays total.
pub fn months_before(as_of: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    as_of
        .checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `at` falls inside the `months`-long window ending at `as_of` (inclusive).
pub fn within_months(at: Option<DateTime<Utc>>, as_of: DateTime<Utc>, months: u32) -> bool {
    at.is_some_and(|t| t >= months_before(as_of, months))
}

/// `at` is at least `months` old relative to `as_of` (inclusive).
pub fn older_than_months(at: Option<DateTime<Utc>>, as_of: DateTime<Utc>, months: u32) -> bool {
    at.is_some_and(|t| t <= months_before(as_of, months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let as_of = ts(2026, 10, 18);
        assert!(within_months(Some(ts(2025, 10, 18)), as_of, 12));
        assert!(!within_months(Some(ts(2025, 10, 17)), as_of, 12));
        assert!(older_than_months(Some(ts(2024, 10, 18)), as_of, 24));
        assert!(!older_than_months(Some(ts(2024, 10, 19)), as_of, 24));
    }

    #[test]
    fn absent_timestamps_satisfy_nothing() {
        let as_of = ts(2026, 10, 18);
        assert!(!within_months(None, as_of, 12));
        assert!(!older_than_months(None, as_of, 24));
    }

    #[test]
    fn month_arithmetic_clamps_to_month_end() {
        assert_eq!(months_before(ts(2026, 3, 31), 1), ts(2026, 2, 28));
    }
}
