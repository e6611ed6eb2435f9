//! External collaborators: the stats cache, the goals file and credentials
//!
//! Paths resolve from env overrides first so tests and alternate installs
//! can point the tool somewhere else.

mod cache;
mod credentials;
mod goals;

use std::path::PathBuf;

pub(crate) use cache::{cache_stamp, load_history};
pub(crate) use credentials::{Credential, load_credential};
pub(crate) use goals::{GoalsConfig, GoalsStore};

/// Claude Code's data directory (`$CLAUDE_CONFIG_DIR` or `~/.claude`)
pub(crate) fn claude_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("CLAUDE_CONFIG_DIR").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    Some(dirs::home_dir()?.join(".claude"))
}

/// Directory owned by this tool (`$CCPULSE_HOME` or `~/.config/ccpulse`)
pub(crate) fn state_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("CCPULSE_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    Some(dirs::home_dir()?.join(".config").join("ccpulse"))
}

pub(crate) fn default_cache_path() -> Option<PathBuf> {
    Some(claude_dir()?.join("stats-cache.json"))
}
