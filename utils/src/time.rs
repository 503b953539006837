//! Time formatting helpers.

use gauss_types::Timestamp;

/// Format a duration in seconds to a short human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Time left from `now` until `deadline`, or `None` once it has passed.
pub fn format_countdown(now: Timestamp, deadline: Timestamp) -> Option<String> {
    if deadline <= now {
        return None;
    }
    Some(format_duration(now.millis_until(deadline) / 1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_two_largest_units() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3 * 3600 + 61), "3h 1m");
        assert_eq!(format_duration(2 * 86400 + 7200), "2d 2h");
    }

    #[test]
    fn countdown_stops_at_deadline() {
        let now = Timestamp::from_secs(1_000);
        assert_eq!(
            format_countdown(now, Timestamp::from_secs(1_090)),
            Some("1m 30s".to_string())
        );
        assert_eq!(format_countdown(now, now), None);
        assert_eq!(format_countdown(now, Timestamp::from_secs(10)), None);
    }
}
