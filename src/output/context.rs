use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

use crate::core::{DailyActivity, filter_calendar_month, filter_last_n_days, filter_today};
use crate::utils::Timezone;

/// Period flag narrowing what the renderers report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeriodFilter {
    Today,
    Week,
    Month,
}

impl PeriodFilter {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PeriodFilter::Today => "today",
            PeriodFilter::Week => "week",
            PeriodFilter::Month => "month",
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            PeriodFilter::Today => "Today",
            PeriodFilter::Week => "Last 7 Days",
            PeriodFilter::Month => "This Month",
        }
    }

    pub(crate) fn select(self, history: &[DailyActivity], today: NaiveDate) -> Vec<&DailyActivity> {
        match self {
            PeriodFilter::Today => filter_today(history, today),
            PeriodFilter::Week => filter_last_n_days(history, today, 7),
            PeriodFilter::Month => filter_calendar_month(history, today, 0),
        }
    }
}

/// Exactly one output per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputMode {
    Json,
    Compact,
    Export(PathBuf),
    Dashboard,
}

impl OutputMode {
    /// JSON beats compact beats export beats the dashboard
    pub(crate) fn select(json: bool, compact: bool, export: Option<PathBuf>) -> Self {
        if json {
            OutputMode::Json
        } else if compact {
            OutputMode::Compact
        } else if let Some(path) = export {
            OutputMode::Export(path)
        } else {
            OutputMode::Dashboard
        }
    }
}

/// Rebuilt for every render pass; never persisted
#[derive(Debug, Clone)]
pub(crate) struct RenderContext {
    pub(crate) now: DateTime<Utc>,
    pub(crate) timezone: Timezone,
    pub(crate) mode: OutputMode,
    pub(crate) period: Option<PeriodFilter>,
    pub(crate) show_goals: bool,
    pub(crate) spinner_phase: usize,
    pub(crate) use_color: bool,
    /// Skip the quota fetch entirely
    pub(crate) quota_enabled: bool,
}

impl RenderContext {
    pub(crate) fn today(&self) -> NaiveDate {
        self.timezone.today(self.now)
    }

    pub(crate) fn hour(&self) -> u32 {
        self.timezone.hour(self.now)
    }
}
