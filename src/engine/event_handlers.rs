// src/engine/event_handlers.rs

//! Event handling logic for the session core.

use tracing::{debug, warn};

use crate::dag::{StepId, StepRepository, status_of};
use crate::timer::TimerScheduler;
use crate::types::StepStatus;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// At least one timer is running; start ticking with this generation.
    StartClock { generation: u64 },
    /// No timer is running any more; stop ticking.
    StopClock,
    /// These timers reached zero on the last tick.
    TimersExpired(Vec<StepId>),
    /// User-visible state changed (or was asked for); re-render.
    Publish,
}

/// Decision returned by the core after handling a single `SessionEvent`.
#[derive(Debug, Clone)]
pub struct SessionStep {
    pub commands: Vec<SessionCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl SessionStep {
    pub(crate) fn publish() -> Self {
        Self {
            commands: vec![SessionCommand::Publish],
            keep_running: true,
        }
    }

    pub(crate) fn quiet() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

/// Toggle a step's completion. Timers are left alone.
///
/// Blocked steps cannot be checked off from the session; completed and
/// ready ones flip as usual.
pub fn handle_toggle(repo: &mut StepRepository, step: &str) -> SessionStep {
    if let Some(s) = repo.step(step) {
        if !status_of(s, repo.completed()).is_actionable() {
            warn!(step = %step, "step is blocked by unfinished dependencies; ignoring");
            return SessionStep::quiet();
        }
    }

    match repo.toggle(step) {
        Some(_) => SessionStep::publish(),
        None => SessionStep::quiet(),
    }
}

/// Timer length for a step whose timer controls are available, or `None`
/// (with a warning). Controls exist only on Ready steps with a duration.
fn timer_minutes_for(repo: &StepRepository, step: &str) -> Option<u32> {
    match repo.step(step) {
        Some(s) => {
            let status = status_of(s, repo.completed());
            if status != StepStatus::Ready {
                warn!(step = %step, %status, "timer controls are only available on ready steps");
                return None;
            }
            let minutes = s.timer_minutes();
            if minutes.is_none() {
                warn!(step = %step, "step has no duration; timer not available");
            }
            minutes
        }
        None => {
            warn!(step = %step, "timer command for unknown step; ignoring");
            None
        }
    }
}

pub fn handle_start_timer(
    repo: &StepRepository,
    timers: &mut TimerScheduler,
    step: &str,
) -> SessionStep {
    let Some(minutes) = timer_minutes_for(repo, step) else {
        return SessionStep::quiet();
    };
    timers.start(step, minutes);
    SessionStep::publish()
}

/// Pausing is accepted whatever the step's status, so a timer left running
/// on a checked-off step can still be stopped.
pub fn handle_pause_timer(timers: &mut TimerScheduler, step: &str) -> SessionStep {
    if timers.pause(step) {
        SessionStep::publish()
    } else {
        SessionStep::quiet()
    }
}

pub fn handle_reset_timer(
    repo: &StepRepository,
    timers: &mut TimerScheduler,
    step: &str,
) -> SessionStep {
    let Some(minutes) = timer_minutes_for(repo, step) else {
        return SessionStep::quiet();
    };
    timers.reset(step, minutes);
    SessionStep::publish()
}

/// Advance every running timer by one second.
pub fn handle_tick(timers: &mut TimerScheduler) -> SessionStep {
    let expired = timers.tick();
    if expired.is_empty() {
        return SessionStep::quiet();
    }

    debug!(?expired, "timers expired on this tick");
    SessionStep {
        commands: vec![SessionCommand::TimersExpired(expired)],
        keep_running: true,
    }
}
