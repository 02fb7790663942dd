// src/dag/readiness.rs

//! Readiness classification of steps against a completion set.
//!
//! This is a pure function of `(steps, completed)`: no memory of previous
//! classifications, so it is simply recomputed after every toggle.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dag::graph::StepGraph;
use crate::dag::step::{Step, StepId};
use crate::types::StepStatus;

/// A blocked step plus what it is still waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedStep<'a> {
    pub step: &'a Step,
    /// Display names of the dependencies that are not completed yet, in
    /// dependency order. Dangling ids show up as the raw id.
    pub waiting_for: Vec<String>,
}

/// Three disjoint, list-ordered partitions of a step list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub ready: Vec<&'a Step>,
    pub blocked: Vec<BlockedStep<'a>>,
    pub completed: Vec<&'a Step>,
}

impl Classification<'_> {
    pub fn ready_ids(&self) -> Vec<&str> {
        self.ready.iter().map(|s| s.step_id.as_str()).collect()
    }

    pub fn blocked_ids(&self) -> Vec<&str> {
        self.blocked.iter().map(|b| b.step.step_id.as_str()).collect()
    }

    pub fn completed_ids(&self) -> Vec<&str> {
        self.completed.iter().map(|s| s.step_id.as_str()).collect()
    }

    /// Nothing left to do: every step is completed.
    pub fn all_done(&self) -> bool {
        self.ready.is_empty() && self.blocked.is_empty()
    }
}

/// Whether every dependency id of `step` is in `completed`.
///
/// Plain set membership on the raw ids: a dangling or self-referencing id
/// is satisfied only if it happens to be in the set.
pub fn deps_satisfied(step: &Step, completed: &BTreeSet<StepId>) -> bool {
    step.dependencies.iter().all(|dep| completed.contains(dep))
}

/// Status of a single step. Shared by the classifier and the layout engine.
pub fn status_of(step: &Step, completed: &BTreeSet<StepId>) -> StepStatus {
    if completed.contains(&step.step_id) {
        StepStatus::Completed
    } else if deps_satisfied(step, completed) {
        StepStatus::Ready
    } else {
        StepStatus::Blocked
    }
}

/// Display names of `step`'s dependencies that are not completed yet.
pub fn blocking_names(graph: &StepGraph, step: &Step, completed: &BTreeSet<StepId>) -> Vec<String> {
    step.dependencies
        .iter()
        .filter(|dep| !completed.contains(*dep))
        .map(|dep| graph.display_name(dep).to_string())
        .collect()
}

/// Partition the graph's steps into Ready / Blocked / Completed.
pub fn classify<'a>(graph: &'a StepGraph, completed: &BTreeSet<StepId>) -> Classification<'a> {
    let mut out = Classification::default();

    for step in graph.steps() {
        match status_of(step, completed) {
            StepStatus::Completed => out.completed.push(step),
            StepStatus::Ready => out.ready.push(step),
            StepStatus::Blocked => out.blocked.push(BlockedStep {
                step,
                waiting_for: blocking_names(graph, step, completed),
            }),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, deps: &[&str]) -> Step {
        let mut s = Step::new(id, format!("Step {id}"));
        s.dependencies = deps.iter().map(|d| d.to_string()).collect();
        s
    }

    fn done(ids: &[&str]) -> BTreeSet<StepId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn self_dependency_stays_blocked_until_toggled() {
        let graph = StepGraph::new(vec![step("1", &["1"])]);

        let c = classify(&graph, &done(&[]));
        assert_eq!(c.blocked_ids(), vec!["1"]);
        assert_eq!(c.blocked[0].waiting_for, vec!["Step 1".to_string()]);

        let c = classify(&graph, &done(&["1"]));
        assert_eq!(c.completed_ids(), vec!["1"]);
        assert!(c.all_done());
    }

    #[test]
    fn dangling_dependency_blocks_and_reports_raw_id() {
        let graph = StepGraph::new(vec![step("1", &[]), step("2", &["1", "missing"])]);

        let c = classify(&graph, &done(&["1"]));
        assert_eq!(c.blocked_ids(), vec!["2"]);
        assert_eq!(c.blocked[0].waiting_for, vec!["missing".to_string()]);
    }

    #[test]
    fn completed_ids_outside_the_list_are_ignored() {
        let graph = StepGraph::new(vec![step("1", &[])]);
        let c = classify(&graph, &done(&["zzz"]));
        assert_eq!(c.ready_ids(), vec!["1"]);
        assert!(c.completed.is_empty());
    }

    #[test]
    fn waiting_for_lists_only_incomplete_deps_in_order() {
        let graph = StepGraph::new(vec![
            step("a", &[]),
            step("b", &[]),
            step("c", &[]),
            step("d", &["c", "a", "b"]),
        ]);

        let c = classify(&graph, &done(&["a"]));
        let blocked = &c.blocked[0];
        assert_eq!(blocked.step.step_id, "d");
        assert_eq!(blocked.waiting_for, vec!["Step c".to_string(), "Step b".to_string()]);
    }
}
