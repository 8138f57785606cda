//! Freshness gate for aggregated bay status.
//!
//! The aggregation itself never rejects old data; the HTTP handler applies
//! this gate before serving the result, unless development mode bypasses it.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Maximum tolerated age of the newest reading.
pub const STALE_AFTER: Duration = Duration::from_secs(12 * 60 * 60);

/// Whether the newest reading is too old to be operationally meaningful.
///
/// `None` means no readings exist at all, which is always stale. A reading
/// with a timestamp in the future counts as fresh.
pub fn is_stale(now: DateTime<Utc>, last_update: Option<DateTime<Utc>>) -> bool {
    let Some(last) = last_update else {
        return true;
    };

    now.signed_duration_since(last)
        .to_std()
        .map(|age| age > STALE_AFTER)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_one_second_past_threshold_is_stale() {
        let last = at(0, 0, 0);
        let now = last + chrono::TimeDelta::try_seconds(12 * 3600 + 1).unwrap();
        assert!(is_stale(now, Some(last)));
    }

    #[test]
    fn test_just_inside_threshold_is_fresh() {
        let last = at(0, 0, 0);
        let now = last + chrono::TimeDelta::try_seconds(11 * 3600 + 59 * 60).unwrap();
        assert!(!is_stale(now, Some(last)));
    }

    #[test]
    fn test_exactly_at_threshold_is_fresh() {
        let last = at(0, 0, 0);
        let now = last + chrono::TimeDelta::try_seconds(12 * 3600).unwrap();
        assert!(!is_stale(now, Some(last)));
    }

    #[test]
    fn test_no_readings_is_stale() {
        assert!(is_stale(at(12, 0, 0), None));
    }

    #[test]
    fn test_future_reading_is_fresh() {
        let now = at(12, 0, 0);
        let last = at(13, 0, 0);
        assert!(!is_stale(now, Some(last)));
    }
}
