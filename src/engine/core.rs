// src/engine/core.rs

//! Pure core session state machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`SessionEvent`]s and produces:
//! - an updated session state
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! events from channels, running the clock and rendering. The core has no
//! channels, no Tokio types, and performs no IO, so every view read between
//! two events is fully settled.

use crate::config::LayoutConfig;
use crate::dag::readiness::{Classification, classify};
use crate::dag::{RecipeSnapshot, Step, StepRepository};
use crate::engine::event_handlers::{
    SessionCommand, SessionStep, handle_pause_timer, handle_reset_timer, handle_start_timer,
    handle_tick, handle_toggle,
};
use crate::engine::SessionEvent;
use crate::layout::{self, GraphLayout};
use crate::timer::{TimerScheduler, TimerSnapshot};

use tracing::{debug, info};

/// Pure core session state.
///
/// Owns the step repository (steps + completion set), the timer scheduler,
/// and whether the shell's clock is currently ticking.
#[derive(Debug, Default)]
pub struct SessionCore {
    repo: StepRepository,
    timers: TimerScheduler,
    clock_running: bool,
    /// Bumped on every clock start; only ticks carrying it are applied.
    clock_generation: u64,
}

impl SessionCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps(steps: Vec<Step>) -> Self {
        let mut core = Self::new();
        core.load(steps);
        core
    }

    pub fn repository(&self) -> &StepRepository {
        &self.repo
    }

    pub fn timer_scheduler(&self) -> &TimerScheduler {
        &self.timers
    }

    /// Whether the core believes the shell's clock is ticking.
    pub fn is_clock_running(&self) -> bool {
        self.clock_running
    }

    /// Generation of the current (or most recent) clock run.
    pub fn clock_generation(&self) -> u64 {
        self.clock_generation
    }

    pub fn snapshot(&self) -> RecipeSnapshot {
        self.repo.snapshot()
    }

    pub fn classification(&self) -> Classification<'_> {
        classify(self.repo.graph(), self.repo.completed())
    }

    pub fn layout(&self, cfg: &LayoutConfig) -> GraphLayout {
        layout::compute(self.repo.graph(), self.repo.completed(), cfg)
    }

    pub fn timers(&self) -> TimerSnapshot {
        self.timers.snapshot()
    }

    fn load(&mut self, steps: Vec<Step>) {
        self.repo.load(steps);
        self.timers.clear();
    }

    /// Handle a single session event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: SessionEvent) -> SessionStep {
        let mut step = match event {
            SessionEvent::LoadRecipe { steps } => {
                self.load(steps);
                SessionStep::publish()
            }
            SessionEvent::BackToSearch => {
                info!("leaving recipe; clearing steps and timers");
                self.repo.clear();
                self.timers.clear();
                SessionStep::publish()
            }
            SessionEvent::ToggleStep { step } => handle_toggle(&mut self.repo, &step),
            SessionEvent::StartTimer { step } => {
                handle_start_timer(&self.repo, &mut self.timers, &step)
            }
            SessionEvent::PauseTimer { step } => handle_pause_timer(&mut self.timers, &step),
            SessionEvent::ResetTimer { step } => {
                handle_reset_timer(&self.repo, &mut self.timers, &step)
            }
            SessionEvent::Tick { generation } => {
                if self.clock_running && generation == self.clock_generation {
                    handle_tick(&mut self.timers)
                } else {
                    debug!(
                        generation,
                        current = self.clock_generation,
                        "dropping tick from a stopped clock"
                    );
                    SessionStep::quiet()
                }
            }
            SessionEvent::ShowRequested => SessionStep::publish(),
            SessionEvent::ShutdownRequested => {
                return SessionStep {
                    commands: self.clock_command(false).into_iter().collect(),
                    keep_running: false,
                };
            }
        };

        if let Some(cmd) = self.clock_command(self.timers.has_running()) {
            step.commands.insert(0, cmd);
        }
        step
    }

    /// Reconcile the desired clock state with the current one.
    fn clock_command(&mut self, wanted: bool) -> Option<SessionCommand> {
        if wanted == self.clock_running {
            return None;
        }
        self.clock_running = wanted;
        debug!(running = wanted, "clock state change");
        Some(if wanted {
            self.clock_generation += 1;
            SessionCommand::StartClock {
                generation: self.clock_generation,
            }
        } else {
            SessionCommand::StopClock
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(id: &str, minutes: u32) -> Step {
        let mut s = Step::new(id, format!("Step {id}"));
        s.duration_minute = Some(minutes);
        s
    }

    fn tick(core: &SessionCore) -> SessionEvent {
        SessionEvent::Tick {
            generation: core.clock_generation(),
        }
    }

    #[test]
    fn clock_starts_with_first_running_timer_and_stops_when_idle() {
        let mut core = SessionCore::with_steps(vec![timed("1", 1)]);

        let step = core.step(SessionEvent::StartTimer { step: "1".into() });
        assert_eq!(step.commands[0], SessionCommand::StartClock { generation: 1 });
        assert!(core.is_clock_running());

        let step = core.step(SessionEvent::PauseTimer { step: "1".into() });
        assert_eq!(step.commands[0], SessionCommand::StopClock);
        assert!(!core.is_clock_running());
    }

    #[test]
    fn expiry_stops_the_clock() {
        let mut core = SessionCore::with_steps(vec![timed("1", 1)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });

        for _ in 0..59 {
            let step = core.step(tick(&core));
            assert!(step.commands.is_empty());
        }
        let step = core.step(tick(&core));
        assert_eq!(
            step.commands,
            vec![
                SessionCommand::StopClock,
                SessionCommand::TimersExpired(vec!["1".to_string()]),
            ]
        );
    }

    #[test]
    fn toggling_does_not_touch_timers() {
        let mut core = SessionCore::with_steps(vec![timed("1", 2)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });
        core.step(tick(&core));
        core.step(SessionEvent::ToggleStep { step: "1".into() });

        let timer = core.timers().get("1").copied().unwrap();
        assert!(timer.is_running);
        assert_eq!(timer.remaining_seconds, 119);
        assert!(core.repository().is_completed("1"));
    }

    #[test]
    fn timer_commands_for_untimed_steps_are_ignored() {
        let mut core = SessionCore::with_steps(vec![Step::new("1", "Plate"), timed("2", 0)]);

        let step = core.step(SessionEvent::StartTimer { step: "1".into() });
        assert!(step.commands.is_empty());
        core.step(SessionEvent::StartTimer { step: "2".into() });
        core.step(SessionEvent::ResetTimer { step: "ghost".into() });

        assert!(core.timers().timers.is_empty());
        assert!(!core.is_clock_running());
    }

    #[test]
    fn loading_a_recipe_clears_completion_and_timers() {
        let mut core = SessionCore::with_steps(vec![timed("1", 1)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });
        core.step(SessionEvent::ToggleStep { step: "1".into() });

        let step = core.step(SessionEvent::LoadRecipe {
            steps: vec![timed("1", 3)],
        });

        assert_eq!(step.commands[0], SessionCommand::StopClock);
        assert!(core.repository().completed().is_empty());
        assert_eq!(core.timers(), TimerSnapshot::default());
    }

    #[test]
    fn ticks_from_a_stopped_clock_are_dropped() {
        let mut core = SessionCore::with_steps(vec![timed("1", 1)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });
        let first = core.clock_generation();

        core.step(SessionEvent::PauseTimer { step: "1".into() });
        // Queued by the first clock run before it was stopped.
        core.step(SessionEvent::Tick { generation: first });
        assert_eq!(core.timers().get("1").unwrap().remaining_seconds, 60);

        let step = core.step(SessionEvent::StartTimer { step: "1".into() });
        assert_eq!(step.commands[0], SessionCommand::StartClock { generation: first + 1 });
        core.step(SessionEvent::Tick { generation: first });
        assert_eq!(core.timers().get("1").unwrap().remaining_seconds, 60);

        core.step(tick(&core));
        assert_eq!(core.timers().get("1").unwrap().remaining_seconds, 59);
    }

    #[test]
    fn blocked_steps_cannot_be_checked_off_or_timed() {
        let mut blocked = timed("2", 5);
        blocked.dependencies = vec!["1".to_string()];
        let mut core = SessionCore::with_steps(vec![Step::new("1", "Prep"), blocked]);

        let step = core.step(SessionEvent::ToggleStep { step: "2".into() });
        assert!(step.commands.is_empty());
        assert!(!core.repository().is_completed("2"));

        let step = core.step(SessionEvent::StartTimer { step: "2".into() });
        assert!(step.commands.is_empty());
        assert!(core.timers().get("2").is_none());

        core.step(SessionEvent::ToggleStep { step: "1".into() });
        core.step(SessionEvent::StartTimer { step: "2".into() });
        assert!(core.timers().get("2").unwrap().is_running);
    }

    #[test]
    fn completed_steps_can_be_unchecked_but_not_restarted() {
        let mut core = SessionCore::with_steps(vec![timed("1", 2)]);
        core.step(SessionEvent::ToggleStep { step: "1".into() });

        let step = core.step(SessionEvent::StartTimer { step: "1".into() });
        assert!(step.commands.is_empty());

        core.step(SessionEvent::ToggleStep { step: "1".into() });
        assert!(!core.repository().is_completed("1"));
    }

    #[test]
    fn running_timer_on_completed_step_can_still_be_paused() {
        let mut core = SessionCore::with_steps(vec![timed("1", 2)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });
        core.step(SessionEvent::ToggleStep { step: "1".into() });

        let step = core.step(SessionEvent::PauseTimer { step: "1".into() });
        assert_eq!(step.commands[0], SessionCommand::StopClock);
        assert!(!core.timers().get("1").unwrap().is_running);
    }

    #[test]
    fn shutdown_stops_clock_and_exits() {
        let mut core = SessionCore::with_steps(vec![timed("1", 1)]);
        core.step(SessionEvent::StartTimer { step: "1".into() });

        let step = core.step(SessionEvent::ShutdownRequested);
        assert!(!step.keep_running);
        assert_eq!(step.commands, vec![SessionCommand::StopClock]);
    }
}
