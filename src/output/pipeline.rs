//! One render pass: pick the output mode and run the matching renderer

use std::path::PathBuf;

use crate::core::{UsageHistory, UsageSummary};
use crate::error::AppError;
use crate::output::context::{OutputMode, RenderContext};
use crate::output::dashboard::{DashboardInputs, dashboard_lines};
use crate::output::json::{output_json, write_export};
use crate::output::statusline::compact_line;
use crate::output::style::Line;
use crate::quota::{QuotaFetcher, QuotaSnapshot};
use crate::store::{Credential, GoalsConfig};

/// Everything a pass reads from outside the process
pub(crate) struct RenderInputs<'a> {
    pub(crate) history: &'a UsageHistory,
    pub(crate) goals: Option<&'a GoalsConfig>,
    pub(crate) quota: Option<&'a QuotaSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RenderOutput {
    /// Printed verbatim (JSON, compact line)
    Text(String),
    /// Styled dashboard lines, painted by the caller
    Document(Vec<Line>),
    /// Export file written; nothing to print
    Exported(PathBuf),
}

/// Quota is only worth a network round-trip for the dashboard
pub(crate) fn wants_quota(ctx: &RenderContext) -> bool {
    ctx.quota_enabled && ctx.mode == OutputMode::Dashboard
}

/// Best-effort snapshot; absent credential or failed fetch is `None`
pub(crate) fn fetch_quota(
    ctx: &RenderContext,
    credential: Option<&Credential>,
    fetcher: &dyn QuotaFetcher,
) -> Option<QuotaSnapshot> {
    if !wants_quota(ctx) {
        return None;
    }
    let Some(token) = credential.and_then(|c| c.quota_token(ctx.now)) else {
        tracing::debug!("no usable credential, skipping quota");
        return None;
    };
    let snapshot = fetcher.fetch(token);
    tracing::debug!(ok = snapshot.is_some(), "quota fetch finished");
    snapshot
}

pub(crate) fn render(ctx: &RenderContext, inputs: &RenderInputs<'_>) -> Result<RenderOutput, AppError> {
    match &ctx.mode {
        OutputMode::Json => Ok(RenderOutput::Text(output_json(inputs.history, ctx))),
        OutputMode::Compact => {
            let summary = UsageSummary::compute(inputs.history, ctx.today());
            Ok(RenderOutput::Text(compact_line(&summary)))
        }
        OutputMode::Export(path) => {
            let summary = UsageSummary::compute(inputs.history, ctx.today());
            write_export(path, inputs.history, &summary, ctx.now)?;
            Ok(RenderOutput::Exported(path.clone()))
        }
        OutputMode::Dashboard => {
            let summary = UsageSummary::compute(inputs.history, ctx.today());
            let dashboard = DashboardInputs {
                history: inputs.history,
                summary: &summary,
                goals: inputs.goals,
                quota: inputs.quota,
            };
            Ok(RenderOutput::Document(dashboard_lines(ctx, &dashboard)))
        }
    }
}
