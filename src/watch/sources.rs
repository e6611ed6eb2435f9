//! Event sources feeding the scheduler
//!
//! Each source is a thread that owns a control channel. Stopping a source
//! sends `Stop` and joins it, so shutdown is deterministic.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event;

use crate::quota::QuotaFetcher;
use crate::store::cache_stamp;
use crate::watch::event::{SchedulerEvent, terminal_event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    /// Restart the current period from zero
    Reset,
    Stop,
}

pub(crate) struct Worker {
    name: &'static str,
    control: Sender<Control>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn<F>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(Receiver<Control>) + Send + 'static,
    {
        let (control, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("ccpulse-{name}"))
            .spawn(move || body(rx))
            .map_err(|e| tracing::warn!(worker = name, error = %e, "failed to spawn"))
            .ok();
        Self {
            name,
            control,
            handle,
        }
    }

    pub(crate) fn controller(&self) -> Sender<Control> {
        self.control.clone()
    }

    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.control.send(Control::Stop);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!(worker = self.name, "worker panicked");
            }
            tracing::debug!(worker = self.name, "stopped");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Emit `event` every `period`; `Reset` restarts the wait
pub(crate) fn ticker(
    name: &'static str,
    period: Duration,
    event: SchedulerEvent,
    tx: Sender<SchedulerEvent>,
) -> Worker {
    Worker::spawn(name, move |control| {
        loop {
            match control.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(event.clone()).is_err() {
                        break;
                    }
                }
                Ok(Control::Reset) => {}
                Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Poll the cache file's stamp and report changes
pub(crate) fn file_poller(path: PathBuf, every: Duration, tx: Sender<SchedulerEvent>) -> Worker {
    Worker::spawn("file-poller", move |control| {
        let mut last = cache_stamp(&path);
        loop {
            match control.recv_timeout(every) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(Control::Reset) => continue,
                Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            }
            let current = cache_stamp(&path);
            if current != last {
                tracing::debug!(path = %path.display(), "cache file changed");
                last = current;
                if tx.send(SchedulerEvent::FileChanged).is_err() {
                    break;
                }
            }
        }
    })
}

fn should_stop(control: &Receiver<Control>) -> bool {
    matches!(
        control.try_recv(),
        Ok(Control::Stop) | Err(TryRecvError::Disconnected)
    )
}

/// Read raw key presses and resizes; polls so a stop request is noticed
/// within `poll`
pub(crate) fn input_reader(poll: Duration, tx: Sender<SchedulerEvent>) -> Worker {
    Worker::spawn("input", move |control| {
        while !should_stop(&control) {
            match event::poll(poll) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input unavailable");
                    break;
                }
            }
            let Ok(raw) = event::read() else {
                continue;
            };
            if let Some(event) = terminal_event(&raw)
                && tx.send(event).is_err()
            {
                break;
            }
        }
    })
}

/// One quota fetch on a detached thread, reported as `QuotaFetched`.
///
/// Never joined: shutdown must not wait on the network. A result that
/// arrives after the scheduler is gone is dropped with the channel.
pub(crate) fn quota_request(
    fetcher: Arc<dyn QuotaFetcher>,
    token: String,
    tx: Sender<SchedulerEvent>,
) -> bool {
    let spawned = thread::Builder::new()
        .name("ccpulse-quota".to_string())
        .spawn(move || {
            let snapshot = fetcher.fetch(&token);
            tracing::debug!(ok = snapshot.is_some(), "quota fetch finished");
            let _ = tx.send(SchedulerEvent::QuotaFetched(snapshot));
        });
    match spawned {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to spawn quota fetch");
            false
        }
    }
}

/// SIGINT/SIGTERM/SIGHUP become `ShutdownRequested`
#[cfg(unix)]
pub(crate) struct SignalListener {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalListener {
    pub(crate) fn spawn(tx: Sender<SchedulerEvent>) -> std::io::Result<Self> {
        use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name("ccpulse-signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    tracing::debug!(signal, "termination signal received");
                    if tx.send(SchedulerEvent::ShutdownRequested).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    pub(crate) fn stop(mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(not(unix))]
pub(crate) struct SignalListener;

#[cfg(not(unix))]
impl SignalListener {
    pub(crate) fn spawn(_tx: Sender<SchedulerEvent>) -> std::io::Result<Self> {
        Ok(Self)
    }

    pub(crate) fn stop(self) {}
}
