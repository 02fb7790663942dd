// src/engine/mod.rs

//! Recipe session engine.
//!
//! This module ties together:
//! - the step repository and its completion set
//! - the timer scheduler
//! - the logical clock that ticks timers once per period
//! - the event loop that reacts to user actions, clock ticks and shutdown
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`], with the clock behind [`clock::ClockBackend`].

use crate::dag::{Step, StepId};

/// Events flowing into the session from the console, the clock, etc.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Replace the step list with a freshly loaded recipe.
    LoadRecipe { steps: Vec<Step> },
    /// Leave the recipe and return to search.
    BackToSearch,
    /// Check or uncheck a step.
    ToggleStep { step: StepId },
    StartTimer { step: StepId },
    PauseTimer { step: StepId },
    ResetTimer { step: StepId },
    /// One period of the logical clock elapsed.
    ///
    /// `generation` identifies the clock run that produced the tick; ticks
    /// from a clock that has since been stopped are dropped.
    Tick { generation: u64 },
    /// The user asked to see the current state.
    ShowRequested,
    /// Graceful shutdown requested (e.g. Ctrl-C or `quit`).
    ShutdownRequested,
}

pub mod clock;
pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use clock::{ClockBackend, TokioClock};
pub use self::core::SessionCore;
pub use event_handlers::{SessionCommand, SessionStep};
pub use runtime::{Runtime, SessionObserver};
