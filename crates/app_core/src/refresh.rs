//! Background catalog refresh
//!
//! A dedicated thread rescans the active directory on a fixed cadence so
//! files added or removed outside the viewer show up without user action.

use crate::{AppError, Engine};
use crossbeam_channel::{Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Time between two background rescans
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Notifications emitted by the refresh thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// The catalog contents differ from the previous scan
    CatalogChanged { len: usize },
}

/// Handle to the running refresh thread.
///
/// Stopping is cooperative: the thread checks the stop flag before each scan
/// and while waiting for the next one. Dropping the handle stops and joins it.
pub struct RefreshLoop {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshLoop {
    /// Start refreshing `engine` every [`REFRESH_INTERVAL`]
    pub fn spawn(engine: Arc<Engine>) -> Result<Self, AppError> {
        Self::start(engine, REFRESH_INTERVAL, None)
    }

    /// Like [`RefreshLoop::spawn`], also reporting catalog changes on `events`.
    ///
    /// Sending never blocks the loop; events are dropped if the channel is
    /// full, and the loop stops sending once the receiver is gone.
    pub fn spawn_with_events(
        engine: Arc<Engine>,
        events: Sender<RefreshEvent>,
    ) -> Result<Self, AppError> {
        Self::start(engine, REFRESH_INTERVAL, Some(events))
    }

    pub(crate) fn start(
        engine: Arc<Engine>,
        interval: Duration,
        events: Option<Sender<RefreshEvent>>,
    ) -> Result<Self, AppError> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::Builder::new()
            .name("catalog-refresh".into())
            .spawn(move || run(&engine, interval, &stop_flag, events))
            .map_err(|e| AppError::Init(format!("Failed to start refresh thread: {}", e)))?;

        tracing::debug!("Refresh loop started ({:?} interval)", interval);

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread to stop and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();

        if handle.join().is_err() {
            tracing::error!("Refresh thread panicked");
        } else {
            tracing::debug!("Refresh loop stopped");
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn run(
    engine: &Engine,
    interval: Duration,
    stop: &AtomicBool,
    mut events: Option<Sender<RefreshEvent>>,
) {
    while !stop.load(Ordering::Acquire) {
        let outcome = engine.refresh();

        if outcome.changed {
            if let Some(tx) = &events {
                match tx.try_send(RefreshEvent::CatalogChanged { len: outcome.len }) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => {
                        tracing::debug!("Refresh listener gone");
                        events = None;
                    }
                }
            }
        }

        sleep_until_stopped(interval, stop);
    }
}

/// Sleep for `interval`, returning early once `stop` is set.
///
/// Spurious unparks just loop back into the wait.
fn sleep_until_stopped(interval: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + interval;

    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::park_timeout(deadline - now);
    }
}
