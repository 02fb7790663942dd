// src/dag/mod.rs

//! Step list, dependency graph and readiness.
//!
//! - [`step`] is the step record delivered by the recipe loader.
//! - [`graph`] is an id-indexed arena over the step list with resolved
//!   adjacency; dangling and cyclic references are tolerated.
//! - [`repository`] owns the step list and the completion set for one
//!   recipe session.
//! - [`readiness`] partitions steps into Ready / Blocked / Completed.

pub mod graph;
pub mod readiness;
pub mod repository;
pub mod step;

pub use graph::StepGraph;
pub use readiness::{BlockedStep, Classification, classify, status_of};
pub use repository::{RecipeSnapshot, StepRepository};
pub use step::{Step, StepId};
