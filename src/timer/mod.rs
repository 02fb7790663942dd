// src/timer/mod.rs

//! Per-step countdown timers.
//!
//! - [`state`] is the per-entry state machine and display helpers.
//! - [`scheduler`] owns every entry and advances them on each logical tick.
//!
//! The scheduler itself has no notion of wall-clock time; the engine's clock
//! backend decides when a tick happens.

pub mod scheduler;
pub mod state;

pub use scheduler::{TimerScheduler, TimerSnapshot};
pub use state::{TimerPhase, TimerState, format_clock};
