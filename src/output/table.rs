//! Comparison and single-period tables

use comfy_table::Cell;

use crate::consts::{MONTH_HIGH_THRESHOLD, TODAY_HIGH_THRESHOLD, WEEK_HIGH_THRESHOLD};
use crate::core::{Trend, UsageSummary, WindowStats};
use crate::output::format::{create_styled_table, format_compact, format_number, header_cell, right_cell};
use crate::output::style::{Style, activity_level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableCell {
    pub(crate) text: String,
    pub(crate) style: Style,
}

impl TableCell {
    fn new(text: String, style: Style) -> Self {
        Self { text, style }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableRow {
    pub(crate) label: &'static str,
    pub(crate) cells: Vec<TableCell>,
}

pub(crate) fn trend_marker(trend: Trend) -> (&'static str, Style) {
    match trend {
        Trend::Up => ("↑", Style::Good),
        Trend::Down => ("↓", Style::Bad),
        Trend::Neutral => ("→", Style::Muted),
    }
}

fn plain_row(label: &'static str, values: [u64; 4], format: fn(u64) -> String) -> TableRow {
    TableRow {
        label,
        cells: values
            .into_iter()
            .map(|v| TableCell::new(format(v), Style::Plain))
            .collect(),
    }
}

pub(crate) fn comparison_headers(summary: &UsageSummary) -> [&'static str; 4] {
    let today = if summary.today_pending {
        "Today (pending)"
    } else {
        "Today"
    };
    [today, "Last 7 Days", "This Month", "All Time"]
}

/// Rows of the four-column table: today / 7 days / month / all time
pub(crate) fn comparison_rows(summary: &UsageSummary) -> Vec<TableRow> {
    let windows = [
        &summary.today,
        &summary.last_7_days,
        &summary.this_month,
        &summary.all_time,
    ];
    let pick = |f: fn(&WindowStats) -> u64| windows.map(f);

    let messages = {
        let (week_arrow, _) = trend_marker(summary.week_trend);
        let (month_arrow, _) = trend_marker(summary.month_trend);
        let today = summary.today.stats.messages;
        let week = summary.last_7_days.stats.messages;
        let month = summary.this_month.stats.messages;
        TableRow {
            label: "Messages",
            cells: vec![
                TableCell::new(
                    format_number(today),
                    Style::Level(activity_level(today, TODAY_HIGH_THRESHOLD)),
                ),
                TableCell::new(
                    format!("{} {week_arrow}", format_number(week)),
                    Style::Level(activity_level(week, WEEK_HIGH_THRESHOLD)),
                ),
                TableCell::new(
                    format!("{} {month_arrow}", format_number(month)),
                    Style::Level(activity_level(month, MONTH_HIGH_THRESHOLD)),
                ),
                TableCell::new(format_number(summary.all_time.stats.messages), Style::Value),
            ],
        }
    };

    vec![
        messages,
        plain_row("Sessions", pick(|w| w.stats.sessions), format_number),
        plain_row("Tool calls", pick(|w| w.stats.tool_calls), format_number),
        plain_row("Active days", pick(|w| w.stats.active_days), format_number),
        plain_row("Tokens", pick(|w| w.tokens.total), format_compact),
    ]
}

/// Rows for a single filtered period, with the top models' token counts
pub(crate) fn period_rows(window: &WindowStats) -> Vec<TableRow> {
    let row = |label, text: String, style| TableRow {
        label,
        cells: vec![TableCell::new(text, style)],
    };
    let mut rows = vec![
        row("Messages", format_number(window.stats.messages), Style::Value),
        row("Sessions", format_number(window.stats.sessions), Style::Plain),
        row("Tool calls", format_number(window.stats.tool_calls), Style::Plain),
        row("Active days", format_number(window.stats.active_days), Style::Plain),
        row("Tokens", format_compact(window.tokens.total), Style::Plain),
    ];
    for (model, tokens) in window.tokens.ranked_models().into_iter().take(5) {
        rows.push(TableRow {
            label: "",
            cells: vec![TableCell::new(
                format!("{model}: {}", format_compact(tokens)),
                Style::Muted,
            )],
        });
    }
    rows
}

/// Lay rows out with comfy-table; one string per terminal line
pub(crate) fn render_table(headers: &[&str], rows: &[TableRow], use_color: bool) -> Vec<String> {
    let mut table = create_styled_table(use_color);
    let mut header = vec![header_cell("", use_color)];
    header.extend(headers.iter().map(|h| header_cell(h, use_color)));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(row.label)];
        cells.extend(
            row.cells
                .iter()
                .map(|c| right_cell(&c.text, c.style, use_color)),
        );
        table.add_row(cells);
    }

    table.to_string().lines().map(str::to_string).collect()
}
