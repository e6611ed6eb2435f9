//! Heatmap and daily bar chart for the dashboard

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::consts::{CHART_DAYS, HEATMAP_DAYS};
use crate::core::DailyActivity;
use crate::output::format::format_number;
use crate::output::style::{Line, Style};
use crate::utils::{parse_day, shift_days};

const HEAT_GLYPHS: [&str; 4] = ["·", "░", "▒", "█"];
const CHART_WIDTH: usize = 30;

/// Messages per day for the `days` calendar days ending today, oldest first
pub(crate) fn daily_series(
    history: &[DailyActivity],
    today: NaiveDate,
    days: i64,
) -> Vec<(NaiveDate, u64)> {
    let mut by_date: HashMap<NaiveDate, u64> = HashMap::new();
    for record in history {
        if let Some(date) = parse_day(&record.date) {
            let slot = by_date.entry(date).or_default();
            *slot = slot.saturating_add(record.message_count);
        }
    }
    (0..days)
        .rev()
        .map(|offset| {
            let date = shift_days(today, -offset);
            (date, by_date.get(&date).copied().unwrap_or(0))
        })
        .collect()
}

/// Shade 0-3 of `value` relative to the window maximum (floored at 1)
pub(crate) fn heat_level(value: u64, max: u64) -> u8 {
    if value == 0 {
        return 0;
    }
    let ratio = value as f64 / max.max(1) as f64;
    if ratio <= 1.0 / 3.0 {
        1
    } else if ratio <= 2.0 / 3.0 {
        2
    } else {
        3
    }
}

/// Three week-rows of seven cells each
pub(crate) fn heatmap_lines(history: &[DailyActivity], today: NaiveDate) -> Vec<Line> {
    let series = daily_series(history, today, HEATMAP_DAYS);
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0);

    let mut lines = vec![Line::styled(
        format!("Activity · last {HEATMAP_DAYS} days"),
        Style::Heading,
    )];
    for week in series.chunks(7) {
        let Some((first, _)) = week.first() else {
            continue;
        };
        let mut line = Line::styled(format!("  {}  ", first.format("%m-%d")), Style::Muted);
        for (_, value) in week {
            let level = heat_level(*value, max);
            line = line.push(format!("{} ", HEAT_GLYPHS[level as usize]), Style::Heat(level));
        }
        lines.push(line);
    }
    lines.push(
        Line::styled("  less ", Style::Muted)
            .push(HEAT_GLYPHS[0], Style::Heat(0))
            .push(HEAT_GLYPHS[1], Style::Heat(1))
            .push(HEAT_GLYPHS[2], Style::Heat(2))
            .push(HEAT_GLYPHS[3], Style::Heat(3))
            .push(" more", Style::Muted),
    );
    lines
}

/// Index of the highest day; the earliest wins a tie. `None` when all are zero.
pub(crate) fn peak_index(series: &[(NaiveDate, u64)]) -> Option<usize> {
    let mut peak: Option<(usize, u64)> = None;
    for (i, (_, value)) in series.iter().enumerate() {
        if *value > 0 && peak.is_none_or(|(_, best)| *value > best) {
            peak = Some((i, *value));
        }
    }
    peak.map(|(i, _)| i)
}

/// Horizontal bars for the most recent days, peak day starred
pub(crate) fn chart_lines(history: &[DailyActivity], today: NaiveDate) -> Vec<Line> {
    let series = daily_series(history, today, CHART_DAYS);
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    let peak = peak_index(&series);

    let mut lines = vec![Line::styled(
        format!("Daily messages · last {CHART_DAYS} days"),
        Style::Heading,
    )];
    for (i, (date, value)) in series.iter().enumerate() {
        let mut width = ((*value as f64 / max as f64) * CHART_WIDTH as f64).round() as usize;
        if *value > 0 {
            width = width.max(1);
        }
        let is_peak = peak == Some(i);
        let mut line = Line::styled(
            format!("  {} {} ", date.format("%m-%d"), weekday_short(*date)),
            Style::Muted,
        )
        .push("█".repeat(width), if is_peak { Style::Warn } else { Style::Accent })
        .push(format!(" {}", format_number(*value)), Style::Plain);
        if is_peak {
            line = line.push(" ★", Style::Warn);
        }
        lines.push(line);
    }
    lines
}

fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}
