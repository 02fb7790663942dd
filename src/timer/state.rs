// src/timer/state.rs

use serde::Serialize;

/// Countdown state of one step's timer.
///
/// Absent (no entry) → Running ⇄ Paused → Expired (`remaining_seconds == 0`,
/// not running). Expired entries stay until reset or a recipe reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub is_running: bool,
}

/// Coarse phase of a timer entry, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Running,
    Paused,
    Expired,
}

impl TimerState {
    pub fn new(minutes: u32) -> Self {
        Self {
            remaining_seconds: u64::from(minutes) * 60,
            is_running: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else if self.remaining_seconds == 0 {
            TimerPhase::Expired
        } else {
            TimerPhase::Paused
        }
    }

    /// Remaining fraction of `total_minutes`, clamped to `[0, 1]`.
    pub fn progress(&self, total_minutes: u32) -> f64 {
        let total = u64::from(total_minutes) * 60;
        if total == 0 {
            return 0.0;
        }
        (self.remaining_seconds as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Advance by one second. Returns `true` when this tick expired the timer.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.is_running || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.is_running = false;
            return true;
        }
        false
    }
}

/// `m:ss` clock text, e.g. `4:05`. Minutes are not capped at 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
