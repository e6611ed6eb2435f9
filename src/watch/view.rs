//! What the live screen shows, independent of the terminal it is drawn on

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::error::AppError;
use crate::output::{
    Line, OutputMode, RenderContext, RenderInputs, RenderOutput, Style, footer_line, render,
};
use crate::quota::QuotaSnapshot;
use crate::store::{load_credential, load_history};
use crate::watch::WatchSettings;

/// Per-session screen state: the last quota snapshot and a pending notice
pub(crate) struct LiveView<'a> {
    settings: &'a WatchSettings,
    quota: Option<QuotaSnapshot>,
    notice: Option<String>,
}

impl<'a> LiveView<'a> {
    pub(crate) fn new(settings: &'a WatchSettings) -> Self {
        Self {
            settings,
            quota: None,
            notice: None,
        }
    }

    pub(crate) fn context(&self, show_goals: bool, spinner_phase: usize) -> RenderContext {
        RenderContext {
            now: Utc::now(),
            timezone: self.settings.timezone,
            mode: OutputMode::Dashboard,
            period: self.settings.period,
            show_goals,
            spinner_phase,
            use_color: self.settings.use_color,
            quota_enabled: self.settings.quota_enabled,
        }
    }

    /// Body lines for a full render. Cache and goals are re-read each time;
    /// a missing cache gives a waiting screen instead of an error.
    /// Clears any pending notice.
    pub(crate) fn screen(&mut self, ctx: &RenderContext) -> Result<Vec<Line>, AppError> {
        self.notice = None;
        let history = match load_history(&self.settings.cache_path) {
            Ok(history) => history,
            Err(AppError::MissingCache { path }) => {
                tracing::debug!(path = %path.display(), "cache missing, waiting");
                return Ok(waiting_lines(&path.display().to_string()));
            }
            Err(e) => return Err(e),
        };
        let goals = self.settings.goals.load();
        let inputs = RenderInputs {
            history: &history,
            goals: goals.as_ref(),
            quota: self.quota.as_ref(),
        };
        match render(ctx, &inputs)? {
            RenderOutput::Document(lines) => Ok(lines),
            RenderOutput::Text(text) => Ok(text.lines().map(Line::plain).collect()),
            RenderOutput::Exported(_) => Ok(Vec::new()),
        }
    }

    pub(crate) fn footer(&self, spinner_phase: usize, remaining: Duration) -> Line {
        let footer = footer_line(spinner_phase, remaining);
        match &self.notice {
            Some(notice) => footer
                .push("  ", Style::Plain)
                .push(notice.clone(), Style::Warn),
            None => footer,
        }
    }

    /// Shown in the footer until the next full render
    pub(crate) fn set_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    pub(crate) fn set_quota(&mut self, snapshot: Option<QuotaSnapshot>) {
        self.quota = snapshot;
    }

    pub(crate) fn goals_configured(&self) -> bool {
        self.settings.goals.load().is_some()
    }

    /// Token for a quota fetch, if quota is on and the credential is usable
    pub(crate) fn quota_token(&self, now: DateTime<Utc>) -> Option<String> {
        if !self.settings.quota_enabled {
            return None;
        }
        let credential = load_credential(
            self.settings.state_dir.as_deref(),
            self.settings.claude_dir.as_deref(),
        )?;
        credential.quota_token(now).map(str::to_string)
    }
}

fn waiting_lines(path: &str) -> Vec<Line> {
    vec![
        Line::styled("◆ ccpulse", Style::Title),
        Line::new(),
        Line::styled(format!("Waiting for {path} ..."), Style::Warn),
        Line::styled(
            "Use Claude Code for a while; this view refreshes once the cache appears.",
            Style::Muted,
        ),
    ]
}

/// Clip the body so it and the footer fit in `rows`; returns the footer
/// row. One blank row separates them when there is room.
pub(crate) fn fit_screen(lines: &mut Vec<Line>, rows: Option<u16>) -> u16 {
    let Some(rows) = rows else {
        return u16::try_from(lines.len() + 1).unwrap_or(u16::MAX);
    };
    let last_row = rows.saturating_sub(1);
    lines.truncate(usize::from(last_row));
    u16::try_from(lines.len() + 1)
        .unwrap_or(u16::MAX)
        .min(last_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{GoalsConfig, GoalsStore};
    use crate::utils::Timezone;
    use std::path::Path;

    fn settings(dir: &Path) -> WatchSettings {
        WatchSettings {
            interval: Duration::from_secs(30),
            cache_path: dir.join("stats-cache.json"),
            goals: GoalsStore::in_dir(dir),
            state_dir: Some(dir.to_path_buf()),
            claude_dir: Some(dir.to_path_buf()),
            timezone: Timezone::Named(chrono_tz::UTC),
            period: None,
            show_goals: true,
            use_color: false,
            quota_enabled: true,
        }
    }

    fn ctx(view: &LiveView<'_>) -> RenderContext {
        let mut ctx = view.context(true, 0);
        ctx.now = "2026-03-14T10:00:00Z".parse().unwrap();
        ctx
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    const CACHE: &str = r#"{
        "lastComputedDate": "2026-03-14",
        "dailyActivity": [
            {"date": "2026-03-13", "messageCount": 40, "sessionCount": 2, "toolCallCount": 3},
            {"date": "2026-03-14", "messageCount": 60, "sessionCount": 1, "toolCallCount": 9}
        ]
    }"#;

    #[test]
    fn missing_cache_waits_then_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let mut view = LiveView::new(&settings);
        let ctx = ctx(&view);

        let waiting = texts(&view.screen(&ctx).unwrap());
        assert!(waiting[2].starts_with("Waiting for "));
        assert!(waiting[2].contains("stats-cache.json"));

        std::fs::write(&settings.cache_path, CACHE).unwrap();
        let lines = texts(&view.screen(&ctx).unwrap());
        assert!(lines[0].contains("ccpulse"));
        assert!(lines.iter().all(|l| !l.starts_with("Waiting for")));
        assert!(lines.iter().any(|l| l.contains("Data through 2026-03-14")));
    }

    #[test]
    fn notice_rides_the_footer_until_next_render() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let mut view = LiveView::new(&settings);

        view.set_notice("No goals set.");
        let footer = view.footer(0, Duration::from_secs(12)).text();
        assert!(footer.contains("Next refresh in 12s"));
        assert!(footer.ends_with("No goals set."));

        let ctx = ctx(&view);
        view.screen(&ctx).unwrap();
        assert!(!view.footer(0, Duration::from_secs(12)).text().contains("No goals"));
    }

    #[test]
    fn goals_are_reread_each_render() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        std::fs::write(&settings.cache_path, CACHE).unwrap();
        let mut view = LiveView::new(&settings);
        let ctx = ctx(&view);
        assert!(!view.goals_configured());

        let before = texts(&view.screen(&ctx).unwrap());
        settings
            .goals
            .save(&GoalsConfig::new(50, 300, ctx.now).unwrap())
            .unwrap();
        assert!(view.goals_configured());
        let after = texts(&view.screen(&ctx).unwrap());
        assert!(after.len() > before.len());
        assert!(after.iter().any(|l| l.contains("60/50")));
    }

    #[test]
    fn stored_quota_is_drawn_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        std::fs::write(&settings.cache_path, CACHE).unwrap();
        let mut view = LiveView::new(&settings);
        let ctx = ctx(&view);
        assert!(!texts(&view.screen(&ctx).unwrap()).contains(&"Quota".to_string()));

        view.set_quota(Some(QuotaSnapshot {
            five_hour: Some(crate::quota::QuotaLimit {
                utilization: 25.0,
                resets_at: None,
            }),
            seven_day: None,
        }));
        assert!(texts(&view.screen(&ctx).unwrap()).contains(&"Quota".to_string()));
    }

    #[test]
    fn quota_token_needs_flag_and_oauth() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        let now = "2026-03-14T10:00:00Z".parse().unwrap();
        assert_eq!(LiveView::new(&settings).quota_token(now), None);

        std::fs::write(
            dir.path().join("auth.json"),
            r#"{"type":"oauth","accessToken":"tok"}"#,
        )
        .unwrap();
        assert_eq!(LiveView::new(&settings).quota_token(now), Some("tok".to_string()));

        settings.quota_enabled = false;
        assert_eq!(LiveView::new(&settings).quota_token(now), None);
    }

    #[test]
    fn tall_body_is_clipped_above_footer() {
        let mut lines: Vec<Line> = (0..40).map(|i| Line::plain(format!("row {i}"))).collect();
        assert_eq!(fit_screen(&mut lines, Some(24)), 23);
        assert_eq!(lines.len(), 23);
        assert_eq!(lines[0].text(), "row 0");

        let mut short: Vec<Line> = (0..5).map(|_| Line::new()).collect();
        assert_eq!(fit_screen(&mut short, Some(24)), 6);
        assert_eq!(short.len(), 5);

        let mut unknown: Vec<Line> = (0..5).map(|_| Line::new()).collect();
        assert_eq!(fit_screen(&mut unknown, None), 6);
    }
}
