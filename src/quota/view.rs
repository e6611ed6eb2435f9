use chrono::{DateTime, Utc};

use crate::output::{ActivityLevel, activity_level};
use crate::quota::{QuotaLimit, QuotaSnapshot};

const BAR_WIDTH: usize = 20;

/// One formatted quota limit, ready for any renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuotaLine {
    pub(crate) label: &'static str,
    pub(crate) percent: u8,
    /// Filled cells out of `BAR_WIDTH`
    pub(crate) filled: usize,
    pub(crate) width: usize,
    pub(crate) level: ActivityLevel,
    pub(crate) resets_in: Option<String>,
}

/// Human countdown: "2d 5h", "3h 12m", "45m", "<1m"; past or present is "now"
pub(crate) fn format_remaining(resets_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (resets_at - now).num_seconds();
    if secs <= 0 {
        return "now".to_string();
    }
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "<1m".to_string()
    }
}

fn line(label: &'static str, limit: &QuotaLimit, now: DateTime<Utc>) -> QuotaLine {
    let utilization = if limit.utilization.is_finite() {
        limit.utilization.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((utilization / 100.0) * BAR_WIDTH as f64).round() as usize;
    QuotaLine {
        label,
        percent: utilization.round() as u8,
        filled: filled.min(BAR_WIDTH),
        width: BAR_WIDTH,
        level: activity_level(utilization.round() as u64, 100),
        resets_in: limit.resets_at.map(|at| format_remaining(at, now)),
    }
}

/// Present limits in fixed order; absent ones are skipped
pub(crate) fn quota_lines(snapshot: &QuotaSnapshot, now: DateTime<Utc>) -> Vec<QuotaLine> {
    [
        ("5-hour", snapshot.five_hour.as_ref()),
        ("7-day", snapshot.seven_day.as_ref()),
    ]
    .into_iter()
    .filter_map(|(label, limit)| limit.map(|l| line(label, l, now)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2026-03-14T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn remaining_granularity() {
        let n = now();
        assert_eq!(format_remaining(n + Duration::hours(53), n), "2d 5h");
        assert_eq!(format_remaining(n + Duration::minutes(192), n), "3h 12m");
        assert_eq!(format_remaining(n + Duration::minutes(45), n), "45m");
        assert_eq!(format_remaining(n + Duration::seconds(20), n), "<1m");
    }

    #[test]
    fn remaining_clamps_to_now() {
        let n = now();
        assert_eq!(format_remaining(n, n), "now");
        assert_eq!(format_remaining(n - Duration::hours(1), n), "now");
    }

    #[test]
    fn lines_skip_absent_limits() {
        let snapshot = QuotaSnapshot {
            five_hour: None,
            seven_day: Some(QuotaLimit {
                utilization: 55.0,
                resets_at: Some(now() + Duration::days(3)),
            }),
        };
        let lines = quota_lines(&snapshot, now());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "7-day");
        assert_eq!(lines[0].percent, 55);
        assert_eq!(lines[0].filled, 11);
        assert_eq!(lines[0].resets_in.as_deref(), Some("3d 0h"));
    }

    #[test]
    fn bar_is_bounded() {
        let snapshot = QuotaSnapshot {
            five_hour: Some(QuotaLimit {
                utilization: 180.0,
                resets_at: None,
            }),
            seven_day: Some(QuotaLimit {
                utilization: -4.0,
                resets_at: None,
            }),
        };
        let lines = quota_lines(&snapshot, now());
        assert_eq!((lines[0].percent, lines[0].filled), (100, 20));
        assert_eq!(lines[0].level, ActivityLevel::Peak);
        assert_eq!((lines[1].percent, lines[1].filled), (0, 0));
        assert!(lines[1].resets_in.is_none());
    }
}
