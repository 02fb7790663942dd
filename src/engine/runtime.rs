// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::dag::StepId;
use crate::errors::Result;

use super::clock::ClockBackend;
use super::core::SessionCore;
use super::{SessionCommand, SessionEvent};

/// Receives settled session state from the runtime.
///
/// The CLI prints to the terminal; tests record what they are shown.
pub trait SessionObserver: Send {
    /// State changed (or the user asked to see it).
    fn publish(&mut self, core: &SessionCore) -> Result<()>;

    /// These timers just reached zero.
    fn timers_expired(&mut self, core: &SessionCore, steps: &[StepId]) -> Result<()>;
}

/// Drives the session core in response to `SessionEvent`s and delegates
/// ticking to a `ClockBackend` and rendering to a `SessionObserver`.
///
/// All semantics live in `SessionCore`; this struct only does async IO.
pub struct Runtime<C: ClockBackend, O: SessionObserver> {
    core: SessionCore,
    event_rx: mpsc::Receiver<SessionEvent>,
    clock: C,
    observer: O,
}

impl<C: ClockBackend, O: SessionObserver> fmt::Debug for Runtime<C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<C: ClockBackend, O: SessionObserver> Runtime<C, O> {
    pub fn new(
        core: SessionCore,
        event_rx: mpsc::Receiver<SessionEvent>,
        clock: C,
        observer: O,
    ) -> Self {
        Self {
            core,
            event_rx,
            clock,
            observer,
        }
    }

    /// Main event loop.
    ///
    /// Returns the final core state so callers can inspect it after exit.
    pub async fn run(mut self) -> Result<SessionCore> {
        info!("session runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("session event channel closed; exiting");
                    break;
                }
            };

            if !matches!(event, SessionEvent::Tick { .. }) {
                debug!(?event, "runtime received event");
            }

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command)?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        self.clock.stop();
        info!("runtime exiting");
        Ok(self.core)
    }

    fn execute_command(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::StartClock { generation } => self.clock.start(generation),
            SessionCommand::StopClock => self.clock.stop(),
            SessionCommand::TimersExpired(steps) => {
                self.observer.timers_expired(&self.core, &steps)?;
            }
            SessionCommand::Publish => self.observer.publish(&self.core)?,
        }
        Ok(())
    }
}
