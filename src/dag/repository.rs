// src/dag/repository.rs

//! Step list + completion set owned by one recipe session.
//!
//! Both halves are held behind `Arc`s and replaced wholesale on every
//! mutation. A [`RecipeSnapshot`] taken before a mutation keeps pointing at
//! the old values, so readers never see a half-applied update.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dag::graph::StepGraph;
use crate::dag::step::{Step, StepId};

/// Settled, immutable view of the repository for classifier / layout reads.
#[derive(Debug, Clone, Default)]
pub struct RecipeSnapshot {
    pub graph: Arc<StepGraph>,
    pub completed: Arc<BTreeSet<StepId>>,
}

#[derive(Debug, Default)]
pub struct StepRepository {
    graph: Arc<StepGraph>,
    completed: Arc<BTreeSet<StepId>>,
}

impl StepRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository already holding `steps` with nothing completed.
    pub fn with_steps(steps: Vec<Step>) -> Self {
        let mut repo = Self::new();
        repo.load(steps);
        repo
    }

    /// Replace the whole step list (new recipe). Clears the completion set.
    pub fn load(&mut self, steps: Vec<Step>) {
        let graph = StepGraph::new(steps);
        info!(steps = graph.len(), "loaded recipe steps");
        self.graph = Arc::new(graph);
        self.completed = Arc::new(BTreeSet::new());
    }

    /// Drop the recipe entirely (user went back to search).
    pub fn clear(&mut self) {
        debug!("clearing recipe steps and completion set");
        self.graph = Arc::new(StepGraph::default());
        self.completed = Arc::new(BTreeSet::new());
    }

    /// Flip completion of one step.
    ///
    /// Returns the new membership, or `None` (and changes nothing) when the
    /// id is not part of the current step list.
    pub fn toggle(&mut self, step_id: &str) -> Option<bool> {
        if !self.graph.contains(step_id) {
            warn!(step = %step_id, "toggle for unknown step; ignoring");
            return None;
        }

        let mut next = (*self.completed).clone();
        let now_completed = if next.remove(step_id) {
            false
        } else {
            next.insert(step_id.to_string());
            true
        };
        self.completed = Arc::new(next);

        debug!(step = %step_id, completed = now_completed, "toggled step");
        Some(now_completed)
    }

    pub fn is_completed(&self, step_id: &str) -> bool {
        self.completed.contains(step_id)
    }

    pub fn completed(&self) -> &BTreeSet<StepId> {
        &self.completed
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.graph.step(step_id)
    }

    pub fn snapshot(&self) -> RecipeSnapshot {
        RecipeSnapshot {
            graph: Arc::clone(&self.graph),
            completed: Arc::clone(&self.completed),
        }
    }

    /// `(completed, total)` step counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.graph.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> StepRepository {
        StepRepository::with_steps(vec![Step::new("1", "Chop"), Step::new("2", "Fry")])
    }

    #[test]
    fn toggling_twice_restores_the_completion_set() {
        let mut repo = repo();
        let before = repo.completed().clone();

        assert_eq!(repo.toggle("1"), Some(true));
        assert!(repo.is_completed("1"));
        assert_eq!(repo.toggle("1"), Some(false));

        assert_eq!(repo.completed(), &before);
    }

    #[test]
    fn toggling_unknown_step_is_a_no_op() {
        let mut repo = repo();
        assert_eq!(repo.toggle("ghost"), None);
        assert!(repo.completed().is_empty());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_toggles() {
        let mut repo = repo();
        repo.toggle("1");
        let snap = repo.snapshot();

        repo.toggle("2");
        repo.toggle("1");

        assert_eq!(snap.completed.iter().collect::<Vec<_>>(), vec!["1"]);
        assert_eq!(repo.progress(), (1, 2));
    }

    #[test]
    fn loading_a_new_recipe_clears_completion() {
        let mut repo = repo();
        repo.toggle("1");
        repo.load(vec![Step::new("1", "Whisk")]);

        assert!(repo.completed().is_empty());
        assert_eq!(repo.step("1").map(|s| s.step_name.as_str()), Some("Whisk"));
    }

    #[test]
    fn clear_empties_steps_and_completion() {
        let mut repo = repo();
        repo.toggle("2");
        repo.clear();

        assert_eq!(repo.progress(), (0, 0));
        assert_eq!(repo.toggle("2"), None);
    }
}
