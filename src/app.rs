use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cli::{Cli, GoalsCommand};
use crate::error::AppError;
use crate::output::{
    Painter, RenderContext, RenderInputs, RenderOutput, fetch_quota, format_number, render,
};
use crate::quota::HttpQuotaFetcher;
use crate::store::{
    GoalsConfig, GoalsStore, claude_dir, default_cache_path, load_credential, load_history,
    state_dir,
};
use crate::utils::Timezone;
use crate::watch::{self, WatchSettings};

/// Filesystem locations resolved once per invocation
pub(crate) struct Paths {
    pub(crate) cache: PathBuf,
    pub(crate) claude_dir: Option<PathBuf>,
    pub(crate) state_dir: Option<PathBuf>,
}

impl Paths {
    pub(crate) fn resolve(cache_override: Option<PathBuf>) -> Result<Self, AppError> {
        let cache = match cache_override {
            Some(path) => path,
            None => default_cache_path().ok_or(AppError::NoHome {
                what: "the stats cache",
            })?,
        };
        Ok(Self {
            cache,
            claude_dir: claude_dir(),
            state_dir: state_dir(),
        })
    }

    fn goals_store(&self) -> Option<GoalsStore> {
        self.state_dir.as_deref().map(GoalsStore::in_dir)
    }
}

pub(crate) fn handle_goals(
    command: &GoalsCommand,
    store: &GoalsStore,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    match *command {
        GoalsCommand::Set { daily, weekly } => {
            let goals = GoalsConfig::new(daily, weekly, now)?;
            store.save(&goals)?;
            println!(
                "Goals saved: {} messages/day, {} messages/week",
                format_number(goals.daily),
                format_number(goals.weekly)
            );
        }
        GoalsCommand::Clear => {
            if store.clear()? {
                println!("Goals cleared.");
            } else {
                println!("No goals were set.");
            }
        }
        GoalsCommand::Show => match store.load() {
            Some(goals) => {
                println!("Daily goal:  {} messages", format_number(goals.daily));
                println!("Weekly goal: {} messages", format_number(goals.weekly));
                println!("Set at:      {}", goals.set_at.format("%Y-%m-%d %H:%M UTC"));
                println!("File:        {}", store.path().display());
            }
            None => println!("No goals set. Use `ccpulse goals set <DAILY> <WEEKLY>`."),
        },
    }
    Ok(())
}

/// One-shot render in the selected output mode
pub(crate) fn handle_render(cli: &Cli, paths: &Paths, timezone: Timezone) -> Result<(), AppError> {
    let history = load_history(&paths.cache)?;
    let ctx = RenderContext {
        now: Utc::now(),
        timezone,
        mode: cli.output_mode(),
        period: cli.period(),
        show_goals: !cli.hide_goals,
        spinner_phase: 0,
        use_color: cli.use_color(),
        quota_enabled: !cli.no_quota,
    };
    let goals = paths.goals_store().and_then(|store| store.load());
    let credential = load_credential(paths.state_dir.as_deref(), paths.claude_dir.as_deref());
    let quota = fetch_quota(&ctx, credential.as_ref(), &HttpQuotaFetcher);
    let inputs = RenderInputs {
        history: &history,
        goals: goals.as_ref(),
        quota: quota.as_ref(),
    };

    match render(&ctx, &inputs)? {
        RenderOutput::Text(text) => println!("{text}"),
        RenderOutput::Document(lines) => {
            let painter = Painter {
                use_color: ctx.use_color,
            };
            println!("{}", painter.paint_all(&lines, "\n"));
        }
        RenderOutput::Exported(path) => println!("Snapshot exported to {}", path.display()),
    }
    Ok(())
}

pub(crate) fn run(cli: Cli) -> Result<(), AppError> {
    let paths = Paths::resolve(cli.cache_file.clone())?;

    if let Some(crate::cli::Commands::Goals { command }) = &cli.command {
        let store = paths.goals_store().ok_or(AppError::NoHome {
            what: "the goals file",
        })?;
        return handle_goals(command, &store, Utc::now());
    }

    let timezone = Timezone::parse(cli.timezone.as_deref())?;

    if cli.watch_ignored() {
        eprintln!("Warning: --watch is ignored with --json, --compact or --export");
    }

    match cli.watch_interval() {
        Some(interval) => {
            let settings = WatchSettings {
                interval,
                goals: paths
                    .goals_store()
                    .ok_or(AppError::NoHome {
                        what: "the goals file",
                    })?,
                cache_path: paths.cache,
                state_dir: paths.state_dir,
                claude_dir: paths.claude_dir,
                timezone,
                period: cli.period(),
                show_goals: !cli.hide_goals,
                use_color: cli.use_color(),
                quota_enabled: !cli.no_quota,
            };
            watch::run(&settings, Arc::new(HttpQuotaFetcher))
        }
        None => handle_render(&cli, &paths, timezone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-14T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn goals_set_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = GoalsStore::in_dir(dir.path());

        handle_goals(
            &GoalsCommand::Set {
                daily: 200,
                weekly: 1_000,
            },
            &store,
            now(),
        )
        .unwrap();
        let goals = store.load().unwrap();
        assert_eq!((goals.daily, goals.weekly), (200, 1_000));

        handle_goals(&GoalsCommand::Show, &store, now()).unwrap();
        handle_goals(&GoalsCommand::Clear, &store, now()).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn invalid_goal_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = GoalsStore::in_dir(dir.path());
        let err = handle_goals(
            &GoalsCommand::Set {
                daily: 0,
                weekly: 100,
            },
            &store,
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidGoal { field: "daily", .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn explicit_cache_path_wins() {
        let paths = Paths::resolve(Some(PathBuf::from("/tmp/cache.json"))).unwrap();
        assert_eq!(paths.cache, PathBuf::from("/tmp/cache.json"));
    }
}
