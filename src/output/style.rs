//! Terminal styling as named tokens
//!
//! Renderers build [`Line`]s of tagged [`Span`]s; only [`Painter`] knows how a
//! token turns into escape sequences, so layout code can be tested on text
//! and tags alone.

use crossterm::style::{Color, Stylize};

/// Five activity tiers above a quiet baseline, keyed to `value / high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ActivityLevel {
    Quiet,
    Low,
    Moderate,
    Elevated,
    High,
    Peak,
}

/// Band `value` against the column's expected high-water mark.
/// Cut points are 0.1 / 0.3 / 0.5 / 0.7 / 0.9 of `high`.
pub(crate) fn activity_level(value: u64, high: u64) -> ActivityLevel {
    let ratio = value as f64 / high.max(1) as f64;
    if ratio >= 0.9 {
        ActivityLevel::Peak
    } else if ratio >= 0.7 {
        ActivityLevel::High
    } else if ratio >= 0.5 {
        ActivityLevel::Elevated
    } else if ratio >= 0.3 {
        ActivityLevel::Moderate
    } else if ratio >= 0.1 {
        ActivityLevel::Low
    } else {
        ActivityLevel::Quiet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Plain,
    Title,
    Heading,
    Value,
    Muted,
    Accent,
    Good,
    Warn,
    Bad,
    Level(ActivityLevel),
    /// Heatmap shade 0-3
    Heat(u8),
}

impl Style {
    fn color(self) -> Option<Color> {
        match self {
            Style::Plain | Style::Value => None,
            Style::Title => Some(Color::Magenta),
            Style::Heading | Style::Accent => Some(Color::Cyan),
            Style::Muted => Some(Color::DarkGrey),
            Style::Good => Some(Color::Green),
            Style::Warn => Some(Color::Yellow),
            Style::Bad => Some(Color::Red),
            Style::Level(level) => Some(level_color(level)),
            Style::Heat(0) => Some(Color::DarkGrey),
            Style::Heat(1) => Some(Color::DarkGreen),
            Style::Heat(_) => Some(Color::Green),
        }
    }

    fn bold(self) -> bool {
        matches!(
            self,
            Style::Title | Style::Heading | Style::Value | Style::Heat(3)
        )
    }
}

fn level_color(level: ActivityLevel) -> Color {
    match level {
        ActivityLevel::Quiet => Color::DarkGrey,
        ActivityLevel::Low => Color::Blue,
        ActivityLevel::Moderate => Color::Cyan,
        ActivityLevel::Elevated => Color::Green,
        ActivityLevel::High => Color::Yellow,
        ActivityLevel::Peak => Color::Red,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) text: String,
    pub(crate) style: Style,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) spans: Vec<Span>,
}

impl Line {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self::new().push(text, Style::Plain)
    }

    pub(crate) fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new().push(text, style)
    }

    pub(crate) fn push(mut self, text: impl Into<String>, style: Style) -> Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    /// Text without any styling
    pub(crate) fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[cfg(test)]
    pub(crate) fn has_style(&self, style: Style) -> bool {
        self.spans.iter().any(|s| s.style == style)
    }
}

/// Turns tagged lines into terminal text
#[derive(Debug, Clone, Copy)]
pub(crate) struct Painter {
    pub(crate) use_color: bool,
}

impl Painter {
    pub(crate) fn paint(&self, line: &Line) -> String {
        if !self.use_color {
            return line.text();
        }
        let mut out = String::new();
        for span in &line.spans {
            let mut styled = span.text.as_str().stylize();
            if let Some(color) = span.style.color() {
                styled = styled.with(color);
            }
            if span.style.bold() {
                styled = styled.bold();
            }
            out.push_str(&styled.to_string());
        }
        out
    }

    /// Join painted lines with `newline` ("\n" normally, "\r\n" in raw mode)
    pub(crate) fn paint_all(&self, lines: &[Line], newline: &str) -> String {
        lines
            .iter()
            .map(|line| self.paint(line))
            .collect::<Vec<_>>()
            .join(newline)
    }
}
