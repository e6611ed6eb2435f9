//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::consts::DEFAULT_WATCH_INTERVAL_SECS;
use crate::output::{OutputMode, PeriodFilter};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "ccpulse")]
#[command(
    about = "Live dashboard for Claude Code activity: streaks, trends, goals and quota",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Output a JSON snapshot
    #[arg(short, long)]
    pub(crate) json: bool,

    /// Single line for statusline/tmux integration
    #[arg(short = 'c', long)]
    pub(crate) compact: bool,

    /// Write a full JSON snapshot to FILE instead of printing
    #[arg(short, long, value_name = "FILE")]
    pub(crate) export: Option<PathBuf>,

    /// Only today's activity
    #[arg(long, conflicts_with_all = ["week", "month"])]
    pub(crate) today: bool,

    /// Only the last 7 days
    #[arg(long, conflicts_with = "month")]
    pub(crate) week: bool,

    /// Only the current calendar month
    #[arg(long)]
    pub(crate) month: bool,

    /// Keep the dashboard open and refresh every SECONDS (default 30)
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        num_args = 0..=1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(crate) watch: Option<Option<u64>>,

    /// Timezone for "today" (e.g. "Europe/Berlin", "UTC"; default local)
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long)]
    pub(crate) no_color: bool,

    /// Skip the live quota lookup
    #[arg(long)]
    pub(crate) no_quota: bool,

    /// Start with the goals block hidden
    #[arg(long)]
    pub(crate) hide_goals: bool,

    /// Read this stats cache instead of the default location
    #[arg(long, value_name = "PATH")]
    pub(crate) cache_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Filled from config when `--watch` has no value
    #[arg(skip)]
    pub(crate) config_interval: Option<u64>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.hide_goals && config.hide_goals {
            self.hide_goals = true;
        }
        if !self.no_quota && config.no_quota {
            self.no_quota = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self.config_interval = config.interval.filter(|&secs| secs > 0);

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn output_mode(&self) -> OutputMode {
        OutputMode::select(self.json, self.compact, self.export.clone())
    }

    pub(crate) fn period(&self) -> Option<PeriodFilter> {
        if self.today {
            Some(PeriodFilter::Today)
        } else if self.week {
            Some(PeriodFilter::Week)
        } else if self.month {
            Some(PeriodFilter::Month)
        } else {
            None
        }
    }

    /// `--watch` combined with a one-shot mode
    pub(crate) fn watch_ignored(&self) -> bool {
        self.watch.is_some() && self.output_mode() != OutputMode::Dashboard
    }

    /// Refresh interval when live mode applies
    pub(crate) fn watch_interval(&self) -> Option<Duration> {
        if self.watch_ignored() {
            return None;
        }
        let secs = self
            .watch?
            .or(self.config_interval)
            .unwrap_or(DEFAULT_WATCH_INTERVAL_SECS);
        Some(Duration::from_secs(secs))
    }
}
