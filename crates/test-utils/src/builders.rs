#![allow(dead_code)]

use stepdag::dag::{Step, StepGraph};

/// Builder for a single `Step`.
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    /// Step whose name is `"Step <id>"`.
    pub fn new(id: &str) -> Self {
        Self {
            step: Step::new(id, format!("Step {id}")),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.step.step_name = name.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.step.dependencies.push(dep.to_string());
        self
    }

    pub fn minutes(mut self, minutes: u32) -> Self {
        self.step.duration_minute = Some(minutes);
        self
    }

    pub fn ingredient(mut self, ingredient: &str) -> Self {
        self.step.ingredients.push(ingredient.to_string());
        self
    }

    pub fn build(self) -> Step {
        self.step
    }
}

/// Builder for an ordered step list.
pub struct RecipeBuilder {
    steps: Vec<Step>,
}

impl RecipeBuilder {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Shorthand for a step with only an id and dependencies.
    pub fn with(mut self, id: &str, deps: &[&str]) -> Self {
        let step = deps
            .iter()
            .fold(StepBuilder::new(id), |b, dep| b.after(dep))
            .build();
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Vec<Step> {
        self.steps
    }

    pub fn graph(self) -> StepGraph {
        StepGraph::new(self.steps)
    }
}

impl Default for RecipeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The four-step diamond used throughout the tests:
/// `1 -> {2, 3} -> 4`.
pub fn diamond() -> RecipeBuilder {
    RecipeBuilder::new()
        .with("1", &[])
        .with("2", &["1"])
        .with("3", &["1"])
        .with("4", &["2", "3"])
}
