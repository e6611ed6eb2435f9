/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default watch-mode refresh interval in seconds
pub(crate) const DEFAULT_WATCH_INTERVAL_SECS: u64 = 30;

/// Footer countdown/spinner cadence in watch mode
pub(crate) const FAST_TICK_MS: u64 = 100;

/// Poll granularity for the stats cache file watcher
pub(crate) const FILE_POLL_MS: u64 = 1000;

/// Expected message volume per column; activity colors scale against these
pub(crate) const TODAY_HIGH_THRESHOLD: u64 = 5_000;
pub(crate) const WEEK_HIGH_THRESHOLD: u64 = 30_000;
pub(crate) const MONTH_HIGH_THRESHOLD: u64 = 100_000;

pub(crate) const HEATMAP_DAYS: i64 = 21;
pub(crate) const CHART_DAYS: i64 = 10;
