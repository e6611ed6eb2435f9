use std::time::Duration;

use crate::quota::QuotaSnapshot;

const USAGE_URL: &str = "https://api.anthropic.com/api/oauth/usage";
const OAUTH_BETA: &str = "oauth-2025-04-20";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of quota snapshots; failures collapse to `None`.
/// Shared with a background thread in watch mode.
pub(crate) trait QuotaFetcher: Send + Sync {
    fn fetch(&self, token: &str) -> Option<QuotaSnapshot>;
}

/// Single bearer-authenticated GET against the usage endpoint
#[derive(Debug, Default)]
pub(crate) struct HttpQuotaFetcher;

impl QuotaFetcher for HttpQuotaFetcher {
    fn fetch(&self, token: &str) -> Option<QuotaSnapshot> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build()
            .into();
        let response = match agent
            .get(USAGE_URL)
            .header("Authorization", &format!("Bearer {token}"))
            .header("anthropic-beta", OAUTH_BETA)
            .call()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "quota fetch failed");
                return None;
            }
        };
        let mut body = response.into_body();
        match serde_json::from_reader(body.as_reader()) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::debug!(error = %e, "quota response not understood");
                None
            }
        }
    }
}
