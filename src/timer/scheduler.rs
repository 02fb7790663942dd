// src/timer/scheduler.rs

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dag::StepId;
use crate::timer::state::TimerState;

/// Settled copy of every timer entry, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub timers: Vec<(StepId, TimerState)>,
    /// Steps whose timer ran out since it was last started or reset.
    pub completed: BTreeSet<StepId>,
}

impl TimerSnapshot {
    pub fn get(&self, step_id: &str) -> Option<&TimerState> {
        self.timers
            .iter()
            .find(|(id, _)| id == step_id)
            .map(|(_, state)| state)
    }
}

/// One countdown per step, all advanced by a single logical clock.
///
/// Entries are keyed by step id only; nothing here points back into the
/// step list. Iteration (and therefore tick) order is insertion order.
#[derive(Debug, Default)]
pub struct TimerScheduler {
    entries: Vec<(StepId, TimerState)>,
    index: HashMap<StepId, usize>,
    completed: BTreeSet<StepId>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, step_id: &str) -> Option<&TimerState> {
        self.index.get(step_id).map(|&i| &self.entries[i].1)
    }

    fn get_mut(&mut self, step_id: &str) -> Option<&mut TimerState> {
        self.index.get(step_id).map(|&i| &mut self.entries[i].1)
    }

    fn insert(&mut self, step_id: &str, state: TimerState) {
        match self.index.get(step_id) {
            Some(&i) => self.entries[i].1 = state,
            None => {
                self.index.insert(step_id.to_string(), self.entries.len());
                self.entries.push((step_id.to_string(), state));
            }
        }
    }

    /// Start or resume a timer.
    ///
    /// A new entry starts at `minutes * 60`; an existing one keeps its
    /// remaining seconds. Clears the step's expired flag either way.
    pub fn start(&mut self, step_id: &str, minutes: u32) -> TimerState {
        self.completed.remove(step_id);

        match self.get_mut(step_id) {
            Some(state) => {
                state.is_running = true;
                debug!(step = %step_id, remaining = state.remaining_seconds, "resumed timer");
                *state
            }
            None => {
                let mut state = TimerState::new(minutes);
                state.is_running = true;
                self.insert(step_id, state);
                info!(step = %step_id, minutes, "started timer");
                state
            }
        }
    }

    /// Pause a running timer. Returns `false` if the step has no timer yet.
    pub fn pause(&mut self, step_id: &str) -> bool {
        match self.get_mut(step_id) {
            Some(state) => {
                state.is_running = false;
                debug!(step = %step_id, remaining = state.remaining_seconds, "paused timer");
                true
            }
            None => {
                warn!(step = %step_id, "pause for a timer that was never started; ignoring");
                false
            }
        }
    }

    /// Put a timer back to `minutes * 60`, stopped, whatever its state.
    pub fn reset(&mut self, step_id: &str, minutes: u32) -> TimerState {
        self.completed.remove(step_id);
        let state = TimerState::new(minutes);
        self.insert(step_id, state);
        debug!(step = %step_id, minutes, "reset timer");
        state
    }

    /// Advance every running timer by one second.
    ///
    /// Returns the steps whose timers expired on this tick, in entry order.
    pub fn tick(&mut self) -> Vec<StepId> {
        let mut expired = Vec::new();
        for (step_id, state) in &mut self.entries {
            if state.tick() {
                expired.push(step_id.clone());
            }
        }

        for step_id in &expired {
            info!(step = %step_id, "timer expired");
            self.completed.insert(step_id.clone());
        }
        expired
    }

    /// Whether the next tick would change anything.
    pub fn has_running(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, s)| s.is_running && s.remaining_seconds > 0)
    }

    pub fn is_timer_completed(&self, step_id: &str) -> bool {
        self.completed.contains(step_id)
    }

    pub fn timer_completed(&self) -> &BTreeSet<StepId> {
        &self.completed
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            timers: self.entries.clone(),
            completed: self.completed.clone(),
        }
    }

    /// Forget every timer (new recipe, or back to search).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.completed.clear();
    }
}
