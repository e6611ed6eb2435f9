//! Live quota: fetching (best-effort) and formatting

mod fetch;
mod view;

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub(crate) use fetch::{HttpQuotaFetcher, QuotaFetcher};
pub(crate) use view::quota_lines;

/// One rate-limit window as reported by the usage endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct QuotaLimit {
    /// Percent used, 0-100
    #[serde(default)]
    pub(crate) utilization: f64,
    #[serde(default)]
    pub(crate) resets_at: Option<DateTime<Utc>>,
}

/// Unknown fields in the response are ignored
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct QuotaSnapshot {
    #[serde(default)]
    pub(crate) five_hour: Option<QuotaLimit>,
    #[serde(default)]
    pub(crate) seven_day: Option<QuotaLimit>,
}
