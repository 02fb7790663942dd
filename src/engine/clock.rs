// src/engine/clock.rs

//! Pluggable logical clock.
//!
//! The runtime talks to a `ClockBackend` instead of owning a Tokio interval
//! directly. Production uses [`TokioClock`]; tests can provide a clock that
//! only records start/stop requests and send `SessionEvent::Tick` by hand.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::engine::SessionEvent;

/// Trait abstracting how ticks are produced.
///
/// The core asks for the clock to run only while at least one timer is
/// running, so an idle session never wakes up.
pub trait ClockBackend: Send {
    /// Start ticking. Every `Tick` sent must carry `generation`.
    fn start(&mut self, generation: u64);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Real clock: a background task that sends one `Tick` per period into the
/// session event channel.
///
/// Ticks are ordinary events, so they are serialised with every other
/// mutation and can never overlap. A tick already queued when the clock is
/// stopped still reaches the core, which drops it by generation.
pub struct TokioClock {
    tx: mpsc::Sender<SessionEvent>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl TokioClock {
    pub fn new(tx: mpsc::Sender<SessionEvent>, period: Duration) -> Self {
        Self {
            tx,
            period,
            handle: None,
        }
    }
}

impl ClockBackend for TokioClock {
    fn start(&mut self, generation: u64) {
        // A new generation replaces any previous run.
        self.stop();

        let tx = self.tx.clone();
        let period = self.period;
        info!(?period, generation, "clock started");

        self.handle = Some(tokio::spawn(async move {
            // First tick one full period after start, not immediately.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.send(SessionEvent::Tick { generation }).await.is_err() {
                    debug!("session channel closed; clock task exiting");
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("clock stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        self.stop();
    }
}
