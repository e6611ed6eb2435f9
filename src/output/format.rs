use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::output::style::{ActivityLevel, Style};

/// Thousands-grouped integer: 1234567 -> "1,234,567"
pub(crate) fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Short form: below 1000 literal, then one decimal with K, from a million M
pub(crate) fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn table_level_color(level: ActivityLevel) -> Color {
    match level {
        ActivityLevel::Quiet => Color::DarkGrey,
        ActivityLevel::Low => Color::Blue,
        ActivityLevel::Moderate => Color::Cyan,
        ActivityLevel::Elevated => Color::Green,
        ActivityLevel::High => Color::Yellow,
        ActivityLevel::Peak => Color::Red,
    }
}

/// comfy-table color for a style token
pub(crate) fn table_color(style: Style) -> Option<Color> {
    match style {
        Style::Plain | Style::Value => None,
        Style::Title => Some(Color::Magenta),
        Style::Heading | Style::Accent => Some(Color::Cyan),
        Style::Muted | Style::Heat(0) => Some(Color::DarkGrey),
        Style::Good | Style::Heat(_) => Some(Color::Green),
        Style::Warn => Some(Color::Yellow),
        Style::Bad => Some(Color::Red),
        Style::Level(level) => Some(table_level_color(level)),
    }
}

pub(crate) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(crate) fn right_cell(text: &str, style: Style, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if use_color && let Some(c) = table_color(style) {
        cell = cell.fg(c);
    }
    if style == Style::Value {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(crate) fn create_styled_table(use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if use_color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    normalize_header_separator(&mut table);
    table
}
