//! Refresh state machine
//!
//! All triggers arrive on one channel and are handled to completion on the
//! calling thread, so no render ever overlaps another. The countdown base
//! is taken when a full render *starts*. Network work never runs here: a
//! refresh only asks the host to start a quota fetch, and the result comes
//! back later as its own event.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::quota::QuotaSnapshot;
use crate::watch::event::{KeyCommand, SchedulerEvent};

pub(crate) const NO_GOALS_NOTICE: &str =
    "No goals set. Run `ccpulse goals set <DAILY> <WEEKLY>` to add some.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchedulerState {
    Idle,
    Rendering,
    WatchingForInput,
    ShuttingDown,
}

/// What the scheduler drives; the live terminal in production
pub(crate) trait WatchHost {
    fn render_full(
        &mut self,
        show_goals: bool,
        spinner_phase: usize,
        remaining: Duration,
    ) -> Result<(), AppError>;
    fn render_footer(&mut self, spinner_phase: usize, remaining: Duration) -> Result<(), AppError>;
    fn show_notice(&mut self, message: &str) -> Result<(), AppError>;
    fn goals_configured(&self) -> bool;
    /// Push the next periodic tick a full interval away
    fn restart_periodic(&mut self);
    /// Start a background quota fetch. `false` when there is nothing to
    /// fetch (quota off, no usable credential).
    fn request_quota(&mut self) -> bool;
    fn store_quota(&mut self, snapshot: Option<QuotaSnapshot>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

pub(crate) struct RefreshScheduler {
    state: SchedulerState,
    interval: Duration,
    show_goals: bool,
    spinner_phase: usize,
    last_render: Option<Instant>,
    quota_in_flight: bool,
}

impl RefreshScheduler {
    pub(crate) fn new(interval: Duration, show_goals: bool) -> Self {
        Self {
            state: SchedulerState::Idle,
            interval,
            show_goals,
            spinner_phase: 0,
            last_render: None,
            quota_in_flight: false,
        }
    }

    pub(crate) fn state(&self) -> SchedulerState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn show_goals(&self) -> bool {
        self.show_goals
    }

    /// Time left before the next periodic refresh
    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        match self.last_render {
            Some(at) => self.interval.saturating_sub(now.saturating_duration_since(at)),
            None => self.interval,
        }
    }

    /// First render; leaves the scheduler waiting for input
    pub(crate) fn start(&mut self, host: &mut dyn WatchHost, now: Instant) -> Result<(), AppError> {
        self.refresh(host, now)
    }

    /// New data: kick off a quota fetch, redraw, restart the countdown
    fn refresh(&mut self, host: &mut dyn WatchHost, now: Instant) -> Result<(), AppError> {
        if !self.quota_in_flight {
            self.quota_in_flight = host.request_quota();
        }
        self.full_render(host, now, true)
    }

    fn full_render(
        &mut self,
        host: &mut dyn WatchHost,
        now: Instant,
        reset_baseline: bool,
    ) -> Result<(), AppError> {
        self.state = SchedulerState::Rendering;
        if reset_baseline || self.last_render.is_none() {
            self.last_render = Some(now);
        }
        let result = host.render_full(self.show_goals, self.spinner_phase, self.remaining(now));
        self.state = SchedulerState::WatchingForInput;
        result
    }

    pub(crate) fn handle(
        &mut self,
        event: SchedulerEvent,
        host: &mut dyn WatchHost,
        now: Instant,
    ) -> Result<Flow, AppError> {
        if self.state == SchedulerState::ShuttingDown {
            return Ok(Flow::Stop);
        }
        match event {
            SchedulerEvent::PeriodicTick => self.refresh(host, now)?,
            SchedulerEvent::FileChanged | SchedulerEvent::Key(KeyCommand::Refresh) => {
                host.restart_periodic();
                self.refresh(host, now)?;
            }
            SchedulerEvent::Key(KeyCommand::ToggleGoals) => {
                if host.goals_configured() {
                    self.show_goals = !self.show_goals;
                    self.full_render(host, now, false)?;
                } else {
                    host.show_notice(NO_GOALS_NOTICE)?;
                }
            }
            SchedulerEvent::Resize => self.full_render(host, now, false)?,
            SchedulerEvent::QuotaFetched(snapshot) => {
                self.quota_in_flight = false;
                host.store_quota(snapshot);
                self.full_render(host, now, false)?;
            }
            SchedulerEvent::FastTick => {
                self.spinner_phase = self.spinner_phase.wrapping_add(1);
                host.render_footer(self.spinner_phase, self.remaining(now))?;
            }
            SchedulerEvent::Key(KeyCommand::Quit) | SchedulerEvent::ShutdownRequested => {
                tracing::debug!(quota_in_flight = self.quota_in_flight, "shutting down");
                self.state = SchedulerState::ShuttingDown;
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Dispatch until quit, a shutdown signal, or every sender is gone
    pub(crate) fn run(
        &mut self,
        events: &Receiver<SchedulerEvent>,
        host: &mut dyn WatchHost,
    ) -> Result<(), AppError> {
        while let Ok(event) = events.recv() {
            if self.handle(event, host, Instant::now())? == Flow::Stop {
                return Ok(());
            }
        }
        self.state = SchedulerState::ShuttingDown;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Full { show_goals: bool },
        FullAt { remaining_secs: u64 },
        Footer { remaining_secs: u64 },
        Notice(String),
        RestartPeriodic,
        RequestQuota,
        StoreQuota { present: bool },
    }

    #[derive(Default)]
    struct RecordingHost {
        goals: bool,
        /// Whether `request_quota` reports a started fetch
        quota: bool,
        /// Also record the countdown passed to full renders
        track_countdown: bool,
        calls: Vec<Call>,
    }

    impl WatchHost for RecordingHost {
        fn render_full(
            &mut self,
            show_goals: bool,
            _phase: usize,
            remaining: Duration,
        ) -> Result<(), AppError> {
            if self.track_countdown {
                self.calls.push(Call::FullAt {
                    remaining_secs: remaining.as_secs(),
                });
            } else {
                self.calls.push(Call::Full { show_goals });
            }
            Ok(())
        }

        fn render_footer(&mut self, _phase: usize, remaining: Duration) -> Result<(), AppError> {
            self.calls.push(Call::Footer {
                remaining_secs: remaining.as_secs(),
            });
            Ok(())
        }

        fn show_notice(&mut self, message: &str) -> Result<(), AppError> {
            self.calls.push(Call::Notice(message.to_string()));
            Ok(())
        }

        fn goals_configured(&self) -> bool {
            self.goals
        }

        fn restart_periodic(&mut self) {
            self.calls.push(Call::RestartPeriodic);
        }

        fn request_quota(&mut self) -> bool {
            if self.quota {
                self.calls.push(Call::RequestQuota);
            }
            self.quota
        }

        fn store_quota(&mut self, snapshot: Option<QuotaSnapshot>) {
            self.calls.push(Call::StoreQuota {
                present: snapshot.is_some(),
            });
        }
    }

    fn started(goals: bool) -> (RefreshScheduler, RecordingHost, Instant) {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), true);
        let mut host = RecordingHost {
            goals,
            ..Default::default()
        };
        let t0 = Instant::now();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        scheduler.start(&mut host, t0).unwrap();
        host.calls.clear();
        (scheduler, host, t0)
    }

    #[test]
    fn start_renders_and_waits() {
        let mut scheduler = RefreshScheduler::new(Duration::from_secs(30), true);
        let mut host = RecordingHost::default();
        scheduler.start(&mut host, Instant::now()).unwrap();
        assert_eq!(host.calls, vec![Call::Full { show_goals: true }]);
        assert_eq!(scheduler.state(), SchedulerState::WatchingForInput);
    }

    #[test]
    fn periodic_tick_renders_and_resets_countdown() {
        let (mut s, mut host, t0) = started(false);
        let t30 = t0 + Duration::from_secs(30);
        s.handle(SchedulerEvent::PeriodicTick, &mut host, t30).unwrap();
        assert_eq!(host.calls, vec![Call::Full { show_goals: true }]);
        assert_eq!(s.remaining(t30 + Duration::from_secs(5)), Duration::from_secs(25));
    }

    #[test]
    fn refresh_and_file_change_restart_the_timer() {
        let (mut s, mut host, t0) = started(false);
        let t10 = t0 + Duration::from_secs(10);
        s.handle(SchedulerEvent::Key(KeyCommand::Refresh), &mut host, t10)
            .unwrap();
        s.handle(SchedulerEvent::FileChanged, &mut host, t10).unwrap();
        assert_eq!(
            host.calls,
            vec![
                Call::RestartPeriodic,
                Call::Full { show_goals: true },
                Call::RestartPeriodic,
                Call::Full { show_goals: true },
            ]
        );
        assert_eq!(s.remaining(t10), Duration::from_secs(30));
    }

    #[test]
    fn toggle_goals_keeps_countdown_baseline() {
        let (mut s, mut host, t0) = started(true);
        let t12 = t0 + Duration::from_secs(12);
        s.handle(SchedulerEvent::Key(KeyCommand::ToggleGoals), &mut host, t12)
            .unwrap();
        assert!(!s.show_goals());
        assert_eq!(host.calls, vec![Call::Full { show_goals: false }]);
        assert_eq!(s.remaining(t12), Duration::from_secs(18));

        s.handle(SchedulerEvent::Key(KeyCommand::ToggleGoals), &mut host, t12)
            .unwrap();
        assert!(s.show_goals());
    }

    #[test]
    fn toggle_without_goals_only_notifies() {
        let (mut s, mut host, t0) = started(false);
        s.handle(SchedulerEvent::Key(KeyCommand::ToggleGoals), &mut host, t0)
            .unwrap();
        assert!(s.show_goals());
        assert_eq!(host.calls, vec![Call::Notice(NO_GOALS_NOTICE.to_string())]);
        assert_eq!(s.state(), SchedulerState::WatchingForInput);
    }

    #[test]
    fn fast_tick_only_touches_footer() {
        let (mut s, mut host, t0) = started(false);
        s.handle(
            SchedulerEvent::FastTick,
            &mut host,
            t0 + Duration::from_millis(7_100),
        )
        .unwrap();
        assert_eq!(host.calls, vec![Call::Footer { remaining_secs: 22 }]);
    }

    #[test]
    fn countdown_never_underflows() {
        let (s, _host, t0) = started(false);
        assert_eq!(s.remaining(t0 + Duration::from_secs(90)), Duration::ZERO);
    }

    #[test]
    fn quit_and_signal_shut_down() {
        for event in [
            SchedulerEvent::Key(KeyCommand::Quit),
            SchedulerEvent::ShutdownRequested,
        ] {
            let (mut s, mut host, t0) = started(false);
            assert_eq!(s.handle(event, &mut host, t0).unwrap(), Flow::Stop);
            assert_eq!(s.state(), SchedulerState::ShuttingDown);
            assert_eq!(
                s.handle(SchedulerEvent::PeriodicTick, &mut host, t0).unwrap(),
                Flow::Stop
            );
            assert!(host.calls.is_empty());
        }
    }

    #[test]
    fn run_processes_queue_until_quit() {
        let (mut s, mut host, _t0) = started(false);
        let (tx, rx) = mpsc::channel();
        tx.send(SchedulerEvent::FileChanged).unwrap();
        tx.send(SchedulerEvent::Key(KeyCommand::Quit)).unwrap();
        tx.send(SchedulerEvent::PeriodicTick).unwrap();
        s.run(&rx, &mut host).unwrap();
        assert_eq!(
            host.calls,
            vec![Call::RestartPeriodic, Call::Full { show_goals: true }]
        );
        assert_eq!(s.state(), SchedulerState::ShuttingDown);
    }

    #[test]
    fn run_ends_when_sources_disconnect() {
        let (mut s, mut host, _t0) = started(false);
        let (tx, rx) = mpsc::channel();
        tx.send(SchedulerEvent::PeriodicTick).unwrap();
        drop(tx);
        s.run(&rx, &mut host).unwrap();
        assert_eq!(host.calls, vec![Call::Full { show_goals: true }]);
        assert_eq!(s.state(), SchedulerState::ShuttingDown);
    }

    #[test]
    fn toggle_redraw_shows_running_countdown() {
        let (mut s, mut host, t0) = started(true);
        host.track_countdown = true;
        s.handle(
            SchedulerEvent::Key(KeyCommand::ToggleGoals),
            &mut host,
            t0 + Duration::from_secs(12),
        )
        .unwrap();
        assert_eq!(host.calls, vec![Call::FullAt { remaining_secs: 18 }]);
    }

    #[test]
    fn resize_redraws_without_moving_countdown() {
        let (mut s, mut host, t0) = started(false);
        let t5 = t0 + Duration::from_secs(5);
        s.handle(SchedulerEvent::Resize, &mut host, t5).unwrap();
        assert_eq!(host.calls, vec![Call::Full { show_goals: true }]);
        assert_eq!(s.remaining(t5), Duration::from_secs(25));
    }

    #[test]
    fn quota_is_requested_once_per_flight() {
        let mut s = RefreshScheduler::new(Duration::from_secs(30), true);
        let mut host = RecordingHost {
            quota: true,
            ..Default::default()
        };
        let t0 = Instant::now();
        s.start(&mut host, t0).unwrap();
        s.handle(SchedulerEvent::PeriodicTick, &mut host, t0).unwrap();
        assert_eq!(
            host.calls,
            vec![
                Call::RequestQuota,
                Call::Full { show_goals: true },
                Call::Full { show_goals: true },
            ]
        );

        host.calls.clear();
        s.handle(SchedulerEvent::QuotaFetched(None), &mut host, t0)
            .unwrap();
        s.handle(SchedulerEvent::Key(KeyCommand::Refresh), &mut host, t0)
            .unwrap();
        assert_eq!(
            host.calls,
            vec![
                Call::StoreQuota { present: false },
                Call::Full { show_goals: true },
                Call::RestartPeriodic,
                Call::RequestQuota,
                Call::Full { show_goals: true },
            ]
        );
    }

    #[test]
    fn fetched_quota_redraws_without_moving_countdown() {
        let (mut s, mut host, t0) = started(false);
        let t9 = t0 + Duration::from_secs(9);
        let snapshot = QuotaSnapshot::default();
        s.handle(SchedulerEvent::QuotaFetched(Some(snapshot)), &mut host, t9)
            .unwrap();
        assert_eq!(
            host.calls,
            vec![
                Call::StoreQuota { present: true },
                Call::Full { show_goals: true },
            ]
        );
        assert_eq!(s.remaining(t9), Duration::from_secs(21));
    }

    #[test]
    fn quit_does_not_wait_for_outstanding_fetch() {
        let mut s = RefreshScheduler::new(Duration::from_secs(30), true);
        let mut host = RecordingHost {
            quota: true,
            ..Default::default()
        };
        let (tx, rx) = mpsc::channel();
        s.start(&mut host, Instant::now()).unwrap();
        assert_eq!(host.calls[0], Call::RequestQuota);
        host.calls.clear();

        tx.send(SchedulerEvent::Key(KeyCommand::Quit)).unwrap();
        s.run(&rx, &mut host).unwrap();
        assert_eq!(s.state(), SchedulerState::ShuttingDown);
        assert!(host.calls.is_empty());

        // a late result is ignored
        assert_eq!(
            s.handle(SchedulerEvent::QuotaFetched(None), &mut host, Instant::now())
                .unwrap(),
            Flow::Stop
        );
        assert!(host.calls.is_empty());
    }
}
