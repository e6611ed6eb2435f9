//! Goals file: load never fails, save replaces the file atomically

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoalsConfig {
    /// Messages per day
    pub(crate) daily: u64,
    /// Messages per rolling 7 days
    pub(crate) weekly: u64,
    pub(crate) set_at: DateTime<Utc>,
}

impl GoalsConfig {
    /// Validate raw user input; both goals must be positive
    pub(crate) fn new(daily: i64, weekly: i64, now: DateTime<Utc>) -> Result<Self, AppError> {
        let daily = u64::try_from(daily)
            .ok()
            .filter(|v| *v > 0)
            .ok_or(AppError::InvalidGoal {
                field: "daily",
                value: daily,
            })?;
        let weekly = u64::try_from(weekly)
            .ok()
            .filter(|v| *v > 0)
            .ok_or(AppError::InvalidGoal {
                field: "weekly",
                value: weekly,
            })?;
        Ok(GoalsConfig {
            daily,
            weekly,
            set_at: now,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GoalsStore {
    path: PathBuf,
}

impl GoalsStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("goals.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the file is absent, unparsable, or holds a zero goal
    pub(crate) fn load(&self) -> Option<GoalsConfig> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<GoalsConfig>(&content) {
            Ok(goals) if goals.daily > 0 && goals.weekly > 0 => Some(goals),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "ignoring goals file with zero goal");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed goals file");
                None
            }
        }
    }

    /// Write to a sibling temp file, then rename over the target
    pub(crate) fn save(&self, goals: &GoalsConfig) -> Result<(), AppError> {
        let err = |source| AppError::GoalsStore {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(err)?;
        }
        let json = serde_json::to_string_pretty(goals).map_err(|e| err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(err)?;
            file.write_all(json.as_bytes()).map_err(err)?;
            file.sync_all().map_err(err)?;
        }
        fs::rename(&tmp, &self.path).map_err(err)?;
        tracing::debug!(path = %self.path.display(), "goals saved");
        Ok(())
    }

    /// Returns whether a file was removed
    pub(crate) fn clear(&self) -> Result<bool, AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AppError::GoalsStore {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
