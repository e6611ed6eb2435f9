//! Aggregation engine: pure functions of (history snapshot, today)

mod aggregator;
mod goals;
mod streak;
mod summary;
mod trend;
mod types;
mod window;

pub(crate) use aggregator::aggregate;
pub(crate) use goals::progress;
pub(crate) use summary::{UsageSummary, WindowStats};
pub(crate) use trend::Trend;
pub(crate) use types::{AggregatedStats, DailyActivity, DailyModelTokens, TokenAggregate, UsageHistory};
pub(crate) use window::{filter_calendar_month, filter_last_n_days, filter_today};
