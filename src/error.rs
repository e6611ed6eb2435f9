use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Stats cache not found at {}", path.display())]
    MissingCache { path: PathBuf },

    #[error("Invalid {field} goal \"{value}\" (expected a whole number greater than 0)")]
    InvalidGoal { field: &'static str, value: i64 },

    #[error("Failed to export to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to update goals at {}: {source}", path.display())]
    GoalsStore {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Cannot locate home directory for {what}")]
    NoHome { what: &'static str },

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AppError {
    /// Extra guidance printed under the error line
    pub(crate) fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::MissingCache { .. } => Some(
                "Run Claude Code at least once so it writes stats-cache.json, \
                 or point --cache-file at an existing cache.",
            ),
            AppError::InvalidGoal { .. } => Some("Usage: ccpulse goals set <DAILY> <WEEKLY>"),
            _ => None,
        }
    }
}
