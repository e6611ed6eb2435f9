//! Live mode: a full-screen dashboard refreshed by timer, file change and keys

mod event;
mod scheduler;
mod sources;
mod terminal;
mod view;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::consts::{FAST_TICK_MS, FILE_POLL_MS};
use crate::error::AppError;
use crate::output::{Painter, PeriodFilter};
use crate::quota::{QuotaFetcher, QuotaSnapshot};
use crate::store::GoalsStore;
use crate::utils::Timezone;

use event::SchedulerEvent;
use scheduler::{RefreshScheduler, WatchHost};
use sources::{Control, SignalListener, Worker, file_poller, input_reader, quota_request, ticker};
use terminal::TerminalGuard;
use view::{LiveView, fit_screen};

const NEWLINE: &str = "\r\n";

/// Everything a live session needs, resolved up front
pub(crate) struct WatchSettings {
    pub(crate) interval: Duration,
    pub(crate) cache_path: PathBuf,
    pub(crate) goals: GoalsStore,
    pub(crate) state_dir: Option<PathBuf>,
    pub(crate) claude_dir: Option<PathBuf>,
    pub(crate) timezone: Timezone,
    pub(crate) period: Option<PeriodFilter>,
    pub(crate) show_goals: bool,
    pub(crate) use_color: bool,
    pub(crate) quota_enabled: bool,
}

/// Drives the real terminal
struct LiveHost<'a> {
    view: LiveView<'a>,
    painter: Painter,
    fetcher: Arc<dyn QuotaFetcher>,
    events: Sender<SchedulerEvent>,
    term: TerminalGuard,
    periodic: Sender<Control>,
    footer_row: u16,
}

impl WatchHost for LiveHost<'_> {
    fn render_full(
        &mut self,
        show_goals: bool,
        spinner_phase: usize,
        remaining: Duration,
    ) -> Result<(), AppError> {
        let ctx = self.view.context(show_goals, spinner_phase);
        let mut lines = self.view.screen(&ctx)?;
        self.footer_row = fit_screen(&mut lines, self.term.rows());
        let screen = self.painter.paint_all(&lines, NEWLINE);
        self.term.draw_screen(&screen)?;
        tracing::debug!(lines = lines.len(), "dashboard rendered");
        self.render_footer(ctx.spinner_phase, remaining)
    }

    fn render_footer(&mut self, spinner_phase: usize, remaining: Duration) -> Result<(), AppError> {
        let text = self.painter.paint(&self.view.footer(spinner_phase, remaining));
        self.term.draw_row(self.footer_row, &text)?;
        Ok(())
    }

    fn show_notice(&mut self, message: &str) -> Result<(), AppError> {
        self.view.set_notice(message);
        Ok(())
    }

    fn goals_configured(&self) -> bool {
        self.view.goals_configured()
    }

    fn restart_periodic(&mut self) {
        let _ = self.periodic.send(Control::Reset);
    }

    fn request_quota(&mut self) -> bool {
        match self.view.quota_token(Utc::now()) {
            Some(token) => quota_request(self.fetcher.clone(), token, self.events.clone()),
            None => {
                tracing::debug!("no usable credential, skipping quota");
                self.view.set_quota(None);
                false
            }
        }
    }

    fn store_quota(&mut self, snapshot: Option<QuotaSnapshot>) {
        self.view.set_quota(snapshot);
    }
}

/// Run until quit or a termination signal; the terminal is restored on every exit path
pub(crate) fn run(settings: &WatchSettings, fetcher: Arc<dyn QuotaFetcher>) -> Result<(), AppError> {
    let (tx, rx) = mpsc::channel();
    let signals = SignalListener::spawn(tx.clone())?;
    let term = match TerminalGuard::enter() {
        Ok(term) => term,
        Err(e) => {
            signals.stop();
            return Err(e.into());
        }
    };

    let fast = Duration::from_millis(FAST_TICK_MS);
    let workers: Vec<Worker> = vec![
        ticker("periodic", settings.interval, SchedulerEvent::PeriodicTick, tx.clone()),
        ticker("fast", fast, SchedulerEvent::FastTick, tx.clone()),
        file_poller(
            settings.cache_path.clone(),
            Duration::from_millis(FILE_POLL_MS),
            tx.clone(),
        ),
        input_reader(fast, tx.clone()),
    ];

    let mut host = LiveHost {
        view: LiveView::new(settings),
        painter: Painter {
            use_color: settings.use_color,
        },
        fetcher,
        events: tx,
        term,
        periodic: workers[0].controller(),
        footer_row: 0,
    };
    let mut scheduler = RefreshScheduler::new(settings.interval, settings.show_goals);
    tracing::debug!(interval = ?settings.interval, "watch started");

    let result = scheduler
        .start(&mut host, Instant::now())
        .and_then(|()| scheduler.run(&rx, &mut host));

    for worker in workers {
        worker.stop();
    }
    signals.stop();
    drop(host);
    tracing::debug!(state = ?scheduler.state(), "watch finished");
    result
}
