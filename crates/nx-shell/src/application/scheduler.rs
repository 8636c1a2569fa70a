//! Scheduler: drives a session on a fixed interval.
//!
//! # One timeline (for beginners)
//!
//! Everything that touches the core happens inside one `tokio::select!` loop:
//!
//! ```text
//! loop {
//!     select! (biased) {
//!         shutdown         => stop
//!         ticker           => Session::tick
//!         disk choice      => Session::handle_choice
//!         platform event   => Session::handle_platform_event
//!     }
//! }
//! ```
//!
//! Because only one branch runs at a time, a tick can never start while
//! another tick (or an input event, or a disk resume) is still running.  The
//! ticker uses [`MissedTickBehavior::Skip`]: when a frame runs late the missed
//! ticks are dropped instead of being fired back-to-back to catch up.
//!
//! A due tick is polled before the queues, so a burst of input (a piped
//! script, say) cannot hold back frames or disk choices.  Input waiting in
//! the queue is applied between ticks.
//!
//! The user's disk choice is the only slow operation.  It runs in its own
//! task and comes back through the `choices` channel tagged with its request
//! token.
//!
//! # Shutdown order
//!
//! The loop exits, the ticker is dropped, the choice receiver is closed (so a
//! late choice fails to send and is discarded by its task), and only then is
//! the session shut down and the core released.

use std::future::Future;
use std::time::Duration;

use nx_core::{Console, PlatformEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::mount_disk::ChoiceResponse;
use super::session::{Session, SessionControl, SessionSummary};

/// Frames per second when nothing else is configured.
pub const DEFAULT_TICK_RATE_HZ: u32 = 30;

/// Fixed-interval driver for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    interval: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_rate(DEFAULT_TICK_RATE_HZ)
    }
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Creates a scheduler ticking `hz` times per second.  A rate of zero is
    /// treated as one.
    pub fn from_rate(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs `session` until a `Close` event, the end of the event stream, or
    /// `shutdown` completes.  Returns the session's summary after the core has
    /// been released.
    pub async fn run<C: Console>(
        &self,
        mut session: Session<C>,
        mut events: mpsc::Receiver<PlatformEvent>,
        mut choices: mpsc::UnboundedReceiver<ChoiceResponse>,
        shutdown: impl Future<Output = ()>,
    ) -> SessionSummary {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(interval_ms = self.interval.as_millis() as u64, "scheduler started");

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }

                _ = ticker.tick() => session.tick(),

                Some(response) = choices.recv() => {
                    session.handle_choice(response);
                }

                event = events.recv() => match event {
                    Some(event) => {
                        if session.handle_platform_event(event) == SessionControl::Close {
                            info!("window closed");
                            break;
                        }
                    }
                    None => {
                        debug!("platform event stream ended");
                        break;
                    }
                },
            }
        }

        drop(ticker);
        choices.close();
        session.shutdown()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
