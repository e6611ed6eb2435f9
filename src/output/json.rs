//! JSON snapshot and file export

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;

use crate::consts::DATE_FORMAT;
use crate::core::{
    AggregatedStats, DailyActivity, DailyModelTokens, TokenAggregate, Trend, UsageHistory,
    UsageSummary, WindowStats, aggregate,
};
use crate::error::AppError;
use crate::output::context::{PeriodFilter, RenderContext};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSnapshot<'a> {
    period: &'static str,
    generated_at: String,
    summary: AggregatedStats,
    daily_activity: Vec<&'a DailyActivity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowExport<'a> {
    #[serde(flatten)]
    stats: AggregatedStats,
    tokens: &'a TokenAggregate,
}

impl<'a> From<&'a WindowStats> for WindowExport<'a> {
    fn from(window: &'a WindowStats) -> Self {
        WindowExport {
            stats: window.stats,
            tokens: &window.tokens,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSnapshot<'a> {
    exported_at: String,
    /// Calendar day the windows were computed for
    date: String,
    last_computed_date: Option<&'a str>,
    streak: u64,
    today: WindowExport<'a>,
    last_7_days: WindowExport<'a>,
    previous_7_days: AggregatedStats,
    week_trend: Trend,
    this_month: WindowExport<'a>,
    previous_month: AggregatedStats,
    month_trend: Trend,
    all_time: WindowExport<'a>,
    daily_activity: Vec<&'a DailyActivity>,
    daily_model_tokens: Vec<&'a DailyModelTokens>,
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn sorted_by_date<T, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by(|a, b| key(a).cmp(key(b)));
    items
}

/// Snapshot of the selected period (everything when no filter is set)
pub(crate) fn output_json(history: &UsageHistory, ctx: &RenderContext) -> String {
    let today = ctx.today();
    let records: Vec<&DailyActivity> = match ctx.period {
        Some(period) => period.select(&history.daily_activity, today),
        None => history.daily_activity.iter().collect(),
    };
    let snapshot = JsonSnapshot {
        period: ctx.period.map_or("all", PeriodFilter::label),
        generated_at: timestamp(ctx.now),
        summary: aggregate(records.iter().copied()),
        daily_activity: sorted_by_date(records, |r| r.date.as_str()),
    };

    serde_json::to_string_pretty(&snapshot).unwrap_or_else(|e| {
        eprintln!("Failed to serialize JSON output: {e}");
        "{}".to_string()
    })
}

/// Write the full export snapshot to `path`. Failures are the caller's to report.
pub(crate) fn write_export(
    path: &Path,
    history: &UsageHistory,
    summary: &UsageSummary,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let snapshot = ExportSnapshot {
        exported_at: timestamp(now),
        date: summary.today_date.format(DATE_FORMAT).to_string(),
        last_computed_date: history.last_computed_date.as_deref(),
        streak: summary.streak,
        today: (&summary.today).into(),
        last_7_days: (&summary.last_7_days).into(),
        previous_7_days: summary.previous_7_days,
        week_trend: summary.week_trend,
        this_month: (&summary.this_month).into(),
        previous_month: summary.previous_month,
        month_trend: summary.month_trend,
        all_time: (&summary.all_time).into(),
        daily_activity: sorted_by_date(&history.daily_activity, |r| r.date.as_str()),
        daily_model_tokens: sorted_by_date(&history.daily_model_tokens, |r| r.date.as_str()),
    };
    let err = |source| AppError::Export {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| err(e.into()))?;
    std::fs::write(path, json).map_err(err)?;
    tracing::debug!(path = %path.display(), "export written");
    Ok(())
}
