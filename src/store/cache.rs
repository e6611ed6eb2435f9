//! Read side of Claude Code's `stats-cache.json`
//!
//! Field extraction is lenient: a value of the wrong shape becomes zero or
//! is skipped, it never fails the whole load.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;

use crate::core::{DailyActivity, DailyModelTokens, UsageHistory};
use crate::error::AppError;

/// Identity of the cache file on disk, used to notice rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CacheStamp {
    pub(crate) modified: Option<SystemTime>,
    pub(crate) len: u64,
}

pub(crate) fn cache_stamp(path: &Path) -> Option<CacheStamp> {
    let meta = std::fs::metadata(path).ok()?;
    Some(CacheStamp {
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

/// Load a history snapshot. Only a missing file is an error.
pub(crate) fn load_history(path: &Path) -> Result<UsageHistory, AppError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::MissingCache {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stats cache unreadable");
            return Err(AppError::MissingCache {
                path: path.to_path_buf(),
            });
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(value) => {
            let history = parse_history(&value);
            tracing::debug!(
                path = %path.display(),
                days = history.daily_activity.len(),
                token_days = history.daily_model_tokens.len(),
                "loaded stats cache"
            );
            Ok(history)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stats cache is not valid JSON");
            Ok(UsageHistory::default())
        }
    }
}

fn count(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(non_negative).unwrap_or(0)
}

fn non_negative(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

fn parse_activity(value: &Value) -> Option<DailyActivity> {
    let date = value.get("date")?.as_str()?;
    Some(DailyActivity {
        date: date.to_string(),
        message_count: count(value, "messageCount"),
        session_count: count(value, "sessionCount"),
        tool_call_count: count(value, "toolCallCount"),
    })
}

fn parse_model_tokens(value: &Value) -> Option<DailyModelTokens> {
    let date = value.get("date")?.as_str()?;
    let tokens_by_model: BTreeMap<String, u64> = value
        .get("tokensByModel")
        .and_then(Value::as_object)
        .map(|models| {
            models
                .iter()
                .map(|(model, tokens)| (model.clone(), non_negative(tokens).unwrap_or(0)))
                .collect()
        })
        .unwrap_or_default();
    Some(DailyModelTokens {
        date: date.to_string(),
        tokens_by_model,
    })
}

pub(super) fn parse_history(value: &Value) -> UsageHistory {
    let list = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    };

    UsageHistory {
        daily_activity: list("dailyActivity")
            .iter()
            .filter_map(parse_activity)
            .collect(),
        daily_model_tokens: list("dailyModelTokens")
            .iter()
            .filter_map(parse_model_tokens)
            .collect(),
        last_computed_date: value
            .get("lastComputedDate")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_cache() {
        let value = json!({
            "version": 2,
            "lastComputedDate": "2026-03-13",
            "dailyActivity": [
                {"date": "2026-03-12", "messageCount": 40, "sessionCount": 2, "toolCallCount": 7},
                {"date": "2026-03-13", "messageCount": 12, "sessionCount": 1, "toolCallCount": 0}
            ],
            "dailyModelTokens": [
                {"date": "2026-03-12", "tokensByModel": {"claude-opus-4": 1200, "claude-sonnet-4": 300}}
            ]
        });
        let history = parse_history(&value);
        assert_eq!(history.daily_activity.len(), 2);
        assert_eq!(history.daily_activity[0].message_count, 40);
        assert_eq!(history.daily_activity[0].tool_call_count, 7);
        assert_eq!(history.daily_model_tokens[0].tokens_by_model["claude-opus-4"], 1200);
        assert_eq!(history.last_computed_date.as_deref(), Some("2026-03-13"));
    }

    #[test]
    fn missing_and_wrong_fields_default_to_zero() {
        let value = json!({
            "dailyActivity": [
                {"date": "2026-03-12"},
                {"date": "2026-03-13", "messageCount": "many", "sessionCount": -3},
                {"messageCount": 5}
            ],
            "dailyModelTokens": [{"date": "2026-03-12", "tokensByModel": {"opus": null}}]
        });
        let history = parse_history(&value);
        // The record without a date is dropped.
        assert_eq!(history.daily_activity.len(), 2);
        assert_eq!(history.daily_activity[1].message_count, 0);
        assert_eq!(history.daily_activity[1].session_count, 0);
        assert_eq!(history.daily_model_tokens[0].tokens_by_model["opus"], 0);
        assert!(history.last_computed_date.is_none());
    }

    #[test]
    fn non_object_root_is_empty_history() {
        let history = parse_history(&json!([1, 2, 3]));
        assert!(history.daily_activity.is_empty());
        assert!(history.daily_model_tokens.is_empty());
    }

    #[test]
    fn missing_file_is_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_history(&dir.path().join("stats-cache.json")).unwrap_err();
        assert!(matches!(err, AppError::MissingCache { .. }));
    }

    #[test]
    fn garbage_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats-cache.json");
        std::fs::write(&path, "{not json").unwrap();
        let history = load_history(&path).unwrap();
        assert!(history.daily_activity.is_empty());
    }

    #[test]
    fn stamp_changes_when_file_grows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats-cache.json");
        assert!(cache_stamp(&path).is_none());
        std::fs::write(&path, "{}").unwrap();
        let first = cache_stamp(&path).unwrap();
        std::fs::write(&path, "{\"dailyActivity\":[]}").unwrap();
        assert_ne!(cache_stamp(&path).unwrap(), first);
    }

    #[test]
    fn huge_counts_summarise_without_overflow() {
        let value = json!({
            "dailyActivity": [
                {"date": "2026-03-13", "messageCount": 1e20, "sessionCount": 1},
                {"date": "2026-03-14", "messageCount": 1e20, "sessionCount": 1}
            ],
            "dailyModelTokens": [
                {"date": "2026-03-13", "tokensByModel": {"opus": 1e20}},
                {"date": "2026-03-14", "tokensByModel": {"opus": 1e20}}
            ]
        });
        let history = parse_history(&value);
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let summary = crate::core::UsageSummary::compute(&history, today);
        assert_eq!(summary.all_time.stats.messages, u64::MAX);
        assert_eq!(summary.last_7_days.tokens.total, u64::MAX);
        assert_eq!(summary.streak, 2);
    }
}
