//! Core data model
//!
//! The history is a read-only snapshot of the external stats cache. Every
//! derived value below is recomputed from it on each refresh.

use serde::Serialize;
use std::collections::BTreeMap;

/// One calendar day of activity
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DailyActivity {
    /// Day key (YYYY-MM-DD)
    pub(crate) date: String,
    pub(crate) message_count: u64,
    pub(crate) session_count: u64,
    pub(crate) tool_call_count: u64,
}

/// Tokens per model for one calendar day, joined to activity by `date`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DailyModelTokens {
    pub(crate) date: String,
    pub(crate) tokens_by_model: BTreeMap<String, u64>,
}

/// Snapshot of the stats cache
#[derive(Debug, Default, Clone)]
pub(crate) struct UsageHistory {
    pub(crate) daily_activity: Vec<DailyActivity>,
    pub(crate) daily_model_tokens: Vec<DailyModelTokens>,
    pub(crate) last_computed_date: Option<String>,
}

/// Sums over a subset of activity records
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AggregatedStats {
    pub(crate) messages: u64,
    pub(crate) sessions: u64,
    pub(crate) tool_calls: u64,
    /// Records with at least one message
    pub(crate) active_days: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenAggregate {
    pub(crate) total: u64,
    pub(crate) by_model: BTreeMap<String, u64>,
}

impl TokenAggregate {
    /// Models ordered by descending token count, ties by name
    pub(crate) fn ranked_models(&self) -> Vec<(&str, u64)> {
        let mut models: Vec<(&str, u64)> = self
            .by_model
            .iter()
            .map(|(name, tokens)| (name.as_str(), *tokens))
            .collect();
        models.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        models
    }
}
