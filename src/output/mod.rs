mod charts;
mod context;
mod dashboard;
mod format;
mod json;
mod pipeline;
mod statusline;
mod style;
mod table;

pub(crate) use context::{OutputMode, PeriodFilter, RenderContext};
pub(crate) use dashboard::footer_line;
pub(crate) use format::format_number;
pub(crate) use pipeline::{RenderInputs, RenderOutput, fetch_quota, render};
pub(crate) use style::{ActivityLevel, Line, Painter, Style, activity_level};
