//! Background token refresh.
//!
//! ARCHITECTURE
//! ============
//! `Idle` (no refresh token) -> `Active` (one immediate refresh, then one per
//! interval) -> `Terminated` (session ended, refresh failed, or the handle was
//! stopped). The loop is a plain future: the browser spawns it with
//! `spawn_local`, the CLI awaits it.
//!
//! Attempts are serialized: the next wait starts only after the previous
//! refresh resolved, so a slow refresh delays the cadence instead of
//! overlapping with the next attempt. Cadence is fixed; there is no backoff.
//!
//! Stopping through [`RefreshHandle`] cancels the timer, not the request: an
//! attempt already in flight completes and its result goes through the
//! store's staleness check, so a rotated refresh token is never lost.
//!
//! ERROR HANDLING
//! ==============
//! Any refresh failure ends the session through [`SessionStore::expire`]. A
//! transient network error is not told apart from a rejected token; the kind
//! is only logged.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::{Either, select};
use futures::task::AtomicWaker;
use log::{debug, info, warn};

use crate::api::{ApiError, AuthApi};
use crate::store::{RefreshOutcome, SessionStore};

/// Interval between refresh attempts while a session is active.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Runtime-specific timer used between refresh attempts.
#[async_trait::async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Result of a single refresh attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No active session; nothing was sent.
    Idle,
    /// New tokens stored.
    Refreshed,
    /// The session changed while the request was in flight; result dropped.
    Stale,
    /// The refresh failed and the session was logged out.
    Expired(ApiError),
}

/// Why [`RefreshLoop::run`] returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// There was no session to keep alive.
    Idle,
    /// The session it was started for was logged out or replaced.
    SessionEnded,
    /// A refresh failed and the session was logged out.
    Expired(ApiError),
    /// The owner stopped the loop through its handle.
    Stopped,
}

#[derive(Debug, Default)]
struct StopState {
    stopped: AtomicBool,
    waker: AtomicWaker,
}

impl StopState {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Resolves once the loop has been asked to stop.
struct StopSignal<'a>(&'a StopState);

impl Future for StopSignal<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0.is_stopped() {
            return Poll::Ready(());
        }
        self.0.waker.register(cx.waker());
        if self.0.is_stopped() { Poll::Ready(()) } else { Poll::Pending }
    }
}

/// Cancels the timer of a refresh loop. Stopping is idempotent.
#[derive(Clone, Debug)]
pub struct RefreshHandle {
    state: Arc<StopState>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        if !self.state.stopped.swap(true, Ordering::AcqRel) {
            debug!("refresh loop: stop requested");
        }
        self.state.waker.wake();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state.is_stopped()
    }
}

/// Keeps one session's access token fresh.
pub struct RefreshLoop<A, S> {
    store: SessionStore,
    api: A,
    sleeper: S,
    interval: Duration,
    stop: Arc<StopState>,
}

impl<A, S> RefreshLoop<A, S>
where
    A: AuthApi,
    S: Sleeper,
{
    #[must_use]
    pub fn new(store: SessionStore, api: A, sleeper: S) -> Self {
        Self { store, api, sleeper, interval: DEFAULT_REFRESH_INTERVAL, stop: Arc::default() }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handle that stops this loop; may be taken before or after it runs.
    #[must_use]
    pub fn handle(&self) -> RefreshHandle {
        RefreshHandle { state: self.stop.clone() }
    }

    /// Split into the loop future and its handle.
    pub fn start(self) -> (impl Future<Output = LoopExit>, RefreshHandle) {
        let handle = self.handle();
        (self.run(), handle)
    }

    /// Perform one refresh attempt against the current session.
    pub async fn tick(&self) -> Tick {
        let Some(ticket) = self.store.refresh_ticket() else {
            return Tick::Idle;
        };
        match self.api.refresh(ticket.refresh_token()).await {
            Ok(tokens) => match self.store.apply_refresh(&ticket, tokens) {
                RefreshOutcome::Applied => Tick::Refreshed,
                RefreshOutcome::Stale => Tick::Stale,
            },
            Err(e) => {
                if self.store.expire(&ticket) {
                    warn!("refresh loop: refresh failed, session ended: {e}");
                    Tick::Expired(e)
                } else {
                    debug!("refresh loop: ignoring failure for a superseded session: {e}");
                    Tick::Stale
                }
            }
        }
    }

    /// Refresh now, then once per interval, until the session ends or the
    /// handle is stopped.
    pub async fn run(self) -> LoopExit {
        if self.store.refresh_ticket().is_none() {
            debug!("refresh loop: no session, staying idle");
            return LoopExit::Idle;
        }
        let generation = self.store.generation();
        info!("refresh loop: active (every {}s)", self.interval.as_secs());

        let exit = loop {
            if self.stop.is_stopped() {
                break LoopExit::Stopped;
            }
            if self.store.generation() != generation {
                break LoopExit::SessionEnded;
            }
            match self.tick().await {
                Tick::Refreshed | Tick::Stale => {}
                Tick::Expired(e) => break LoopExit::Expired(e),
                Tick::Idle => break LoopExit::SessionEnded,
            }
            if self.stop.is_stopped() {
                break LoopExit::Stopped;
            }
            let wait = self.sleeper.sleep(self.interval);
            if let Either::Right(_) = select(wait, StopSignal(&self.stop)).await {
                break LoopExit::Stopped;
            }
        };
        log_exit(&exit);
        exit
    }
}

fn log_exit(exit: &LoopExit) {
    match exit {
        LoopExit::Idle => debug!("refresh loop: idle"),
        LoopExit::SessionEnded => info!("refresh loop: session ended"),
        LoopExit::Expired(e) => info!("refresh loop: terminated after failed refresh: {e}"),
        LoopExit::Stopped => info!("refresh loop: stopped"),
    }
}
