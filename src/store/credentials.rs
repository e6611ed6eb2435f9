//! Credential lookup
//!
//! Only one question matters here: is there an OAuth token that can fetch
//! live quota? API keys are recognised but never can.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Credential {
    #[serde(rename_all = "camelCase")]
    Oauth {
        access_token: String,
        /// Expiry in epoch milliseconds
        #[serde(default)]
        expires_at: Option<i64>,
    },
    /// Recognised only; the usage endpoint needs OAuth, so the key itself
    /// is never read
    ApiKey {},
}

impl Credential {
    /// Bearer token usable for the quota endpoint right now
    pub(crate) fn quota_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match self {
            Credential::Oauth {
                access_token,
                expires_at,
            } => {
                if access_token.is_empty() {
                    return None;
                }
                let expired = expires_at
                    .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                    .is_some_and(|expiry| expiry <= now);
                (!expired).then_some(access_token.as_str())
            }
            Credential::ApiKey { .. } => None,
        }
    }
}

/// Claude Code's own credentials file keeps the token under `claudeAiOauth`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaudeCredentialsFile {
    claude_ai_oauth: Option<ClaudeOauth>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaudeOauth {
    access_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

fn read_tool_auth(path: &Path) -> Option<Credential> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(credential) => Some(credential),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "auth file not usable");
            None
        }
    }
}

fn read_claude_credentials(path: &Path) -> Option<Credential> {
    let content = std::fs::read_to_string(path).ok()?;
    let file: ClaudeCredentialsFile = serde_json::from_str(&content).ok()?;
    let oauth = file.claude_ai_oauth?;
    Some(Credential::Oauth {
        access_token: oauth.access_token,
        expires_at: oauth.expires_at,
    })
}

/// The tool's own `auth.json` wins over Claude Code's `.credentials.json`
pub(crate) fn load_credential(state_dir: Option<&Path>, claude_dir: Option<&Path>) -> Option<Credential> {
    let credential = state_dir
        .and_then(|dir| read_tool_auth(&dir.join("auth.json")))
        .or_else(|| claude_dir.and_then(|dir| read_claude_credentials(&dir.join(".credentials.json"))));
    tracing::debug!(
        kind = match &credential {
            Some(Credential::Oauth { .. }) => "oauth",
            Some(Credential::ApiKey { .. }) => "api_key",
            None => "none",
        },
        "resolved credential"
    );
    credential
}
