//! Everything the renderers need, derived in one pass per refresh

use chrono::NaiveDate;

use crate::core::aggregator::{aggregate, aggregate_tokens};
use crate::core::streak::compute_streak;
use crate::core::trend::{Trend, get_trend};
use crate::core::types::{AggregatedStats, DailyActivity, TokenAggregate, UsageHistory};
use crate::core::window::{
    filter_calendar_month, filter_last_n_days, filter_preceding_window, filter_today,
};

/// Stats plus tokens for one window
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct WindowStats {
    pub(crate) stats: AggregatedStats,
    pub(crate) tokens: TokenAggregate,
}

impl WindowStats {
    fn of(history: &UsageHistory, subset: &[&DailyActivity]) -> Self {
        WindowStats {
            stats: aggregate(subset.iter().copied()),
            tokens: aggregate_tokens(&history.daily_model_tokens, subset),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UsageSummary {
    pub(crate) today_date: NaiveDate,
    /// No record for today yet
    pub(crate) today_pending: bool,
    pub(crate) today: WindowStats,
    pub(crate) last_7_days: WindowStats,
    pub(crate) previous_7_days: AggregatedStats,
    pub(crate) this_month: WindowStats,
    pub(crate) previous_month: AggregatedStats,
    pub(crate) all_time: WindowStats,
    pub(crate) streak: u64,
    pub(crate) week_trend: Trend,
    pub(crate) month_trend: Trend,
}

impl UsageSummary {
    pub(crate) fn compute(history: &UsageHistory, today: NaiveDate) -> Self {
        let activity = &history.daily_activity;

        let today_records = filter_today(activity, today);
        let last7 = filter_last_n_days(activity, today, 7);
        let prev7 = filter_preceding_window(activity, today, 14, 7);
        let month = filter_calendar_month(activity, today, 0);
        let prev_month = filter_calendar_month(activity, today, -1);
        let all: Vec<&DailyActivity> = activity.iter().collect();

        let last_7_days = WindowStats::of(history, &last7);
        let this_month = WindowStats::of(history, &month);
        let previous_7_days = aggregate(prev7);
        let previous_month = aggregate(prev_month);

        UsageSummary {
            today_date: today,
            today_pending: today_records.is_empty(),
            today: WindowStats::of(history, &today_records),
            week_trend: get_trend(last_7_days.stats.messages, previous_7_days.messages),
            month_trend: get_trend(this_month.stats.messages, previous_month.messages),
            last_7_days,
            previous_7_days,
            this_month,
            previous_month,
            all_time: WindowStats::of(history, &all),
            streak: compute_streak(activity, today),
        }
    }
}
