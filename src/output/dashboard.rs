//! Full dashboard layout
//!
//! Blocks top to bottom: header, greeting, cache freshness, streak, goals,
//! quota, table(s), heatmap, daily chart. Optional blocks vanish entirely
//! when their input is absent.

use chrono::DateTime;
use chrono::Utc;
use std::time::Duration;

use crate::core::{UsageHistory, UsageSummary, progress};
use crate::output::charts::{chart_lines, heatmap_lines};
use crate::output::context::{PeriodFilter, RenderContext};
use crate::output::format::format_number;
use crate::output::style::{Line, Style, activity_level};
use crate::output::table::{comparison_headers, comparison_rows, period_rows, render_table};
use crate::quota::{QuotaSnapshot, quota_lines};
use crate::store::GoalsConfig;

const GOAL_BAR_WIDTH: usize = 20;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) struct DashboardInputs<'a> {
    pub(crate) history: &'a UsageHistory,
    pub(crate) summary: &'a UsageSummary,
    pub(crate) goals: Option<&'a GoalsConfig>,
    pub(crate) quota: Option<&'a QuotaSnapshot>,
}

/// Five bands over the local hour
pub(crate) fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        21..=23 => "Working late",
        _ => "Burning the midnight oil",
    }
}

fn bar(filled: usize, width: usize) -> (String, String) {
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

fn header_lines(ctx: &RenderContext) -> Vec<Line> {
    vec![
        Line::styled("◆ ccpulse", Style::Title).push("  Claude Code activity", Style::Muted),
        Line::styled(
            format!(
                "{}, {}",
                greeting(ctx.hour()),
                ctx.today().format("%A %B %-d")
            ),
            Style::Plain,
        ),
    ]
}

fn freshness_line(history: &UsageHistory, summary: &UsageSummary) -> Line {
    let line = match history.last_computed_date.as_deref() {
        Some(date) => Line::styled(format!("Data through {date}"), Style::Muted),
        None => Line::styled("Data freshness unknown", Style::Muted),
    };
    if summary.today_pending {
        line.push(" · today's stats pending", Style::Warn)
    } else {
        line
    }
}

fn streak_line(streak: u64) -> Option<Line> {
    (streak > 1).then(|| Line::styled(format!("🔥 {streak}-day streak"), Style::Warn))
}

fn goal_line(label: &str, current: u64, goal: u64) -> Line {
    let p = progress(current, goal);
    let (done, rest) = bar(
        (p.percent as usize * GOAL_BAR_WIDTH).div_ceil(100).min(GOAL_BAR_WIDTH),
        GOAL_BAR_WIDTH,
    );
    let fill_style = if p.met {
        Style::Good
    } else {
        Style::Level(activity_level(u64::from(p.percent), 100))
    };
    let line = Line::plain(format!("  {label:<7} "))
        .push(done, fill_style)
        .push(rest, Style::Muted)
        .push(
            format!(
                " {:>3}%  {}/{}",
                p.percent,
                format_number(p.current),
                format_number(p.goal)
            ),
            Style::Plain,
        );
    if p.met {
        line.push(" ✓", Style::Good)
    } else {
        line
    }
}

fn goal_lines(goals: &GoalsConfig, summary: &UsageSummary) -> Vec<Line> {
    vec![
        Line::styled("Goals", Style::Heading),
        goal_line("Daily", summary.today.stats.messages, goals.daily),
        goal_line("Weekly", summary.last_7_days.stats.messages, goals.weekly),
    ]
}

fn quota_block(snapshot: &QuotaSnapshot, now: DateTime<Utc>) -> Vec<Line> {
    let limits = quota_lines(snapshot, now);
    if limits.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::styled("Quota", Style::Heading)];
    for limit in limits {
        let (used, free) = bar(limit.filled, limit.width);
        let mut line = Line::plain(format!("  {:<7} ", limit.label))
            .push(used, Style::Level(limit.level))
            .push(free, Style::Muted)
            .push(format!(" {:>3}%", limit.percent), Style::Plain);
        if let Some(resets_in) = limit.resets_in {
            line = line.push(format!("  resets in {resets_in}"), Style::Muted);
        }
        lines.push(line);
    }
    lines
}

fn table_lines(ctx: &RenderContext, summary: &UsageSummary) -> Vec<Line> {
    match ctx.period {
        Some(period) => {
            let window = match period {
                PeriodFilter::Today => &summary.today,
                PeriodFilter::Week => &summary.last_7_days,
                PeriodFilter::Month => &summary.this_month,
            };
            render_table(&[period.title()], &period_rows(window), ctx.use_color)
                .into_iter()
                .map(Line::plain)
                .collect()
        }
        None => render_table(
            &comparison_headers(summary),
            &comparison_rows(summary),
            ctx.use_color,
        )
        .into_iter()
        .map(Line::plain)
        .collect(),
    }
}

/// Every dashboard line, unpainted
pub(crate) fn dashboard_lines(ctx: &RenderContext, inputs: &DashboardInputs<'_>) -> Vec<Line> {
    let summary = inputs.summary;
    let mut lines = header_lines(ctx);
    lines.push(freshness_line(inputs.history, summary));
    lines.extend(streak_line(summary.streak));

    if ctx.show_goals
        && let Some(goals) = inputs.goals
    {
        lines.push(Line::new());
        lines.extend(goal_lines(goals, summary));
    }

    if let Some(snapshot) = inputs.quota {
        let block = quota_block(snapshot, ctx.now);
        if !block.is_empty() {
            lines.push(Line::new());
            lines.extend(block);
        }
    }

    lines.push(Line::new());
    lines.extend(table_lines(ctx, summary));

    let activity = &inputs.history.daily_activity;
    let today = ctx.today();
    lines.push(Line::new());
    lines.extend(heatmap_lines(activity, today));
    lines.push(Line::new());
    lines.extend(chart_lines(activity, today));
    lines
}

pub(crate) fn spinner_frame(phase: usize) -> &'static str {
    SPINNER[phase % SPINNER.len()]
}

/// Watch-mode footer: spinner, countdown and key hints
pub(crate) fn footer_line(phase: usize, remaining: Duration) -> Line {
    Line::styled(format!("{} ", spinner_frame(phase)), Style::Accent)
        .push(
            format!("Next refresh in {}s", remaining.as_secs_f64().ceil() as u64),
            Style::Muted,
        )
        .push("  ·  ", Style::Muted)
        .push("r", Style::Accent)
        .push(" refresh  ", Style::Muted)
        .push("g", Style::Accent)
        .push(" goals  ", Style::Muted)
        .push("q", Style::Accent)
        .push(" quit", Style::Muted)
}
