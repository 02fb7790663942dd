// src/dag/step.rs

//! Step records as delivered by the recipe-loading collaborator.

use serde::{Deserialize, Serialize};

/// Canonical step identifier type used throughout the crate.
pub type StepId = String;

/// One unit of recipe work.
///
/// Field names match the JSON the recipe API produces, so a step list can be
/// deserialised straight from a `planned_steps` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: StepId,

    pub step_name: String,

    /// Duration in minutes. `None` means no timer applies; `Some(0)` is kept
    /// distinct in the model but offers no timer either.
    #[serde(default)]
    pub duration_minute: Option<u32>,

    /// Ids of steps that must be completed first.
    ///
    /// May reference missing ids, the step itself, or form cycles.
    #[serde(default)]
    pub dependencies: Vec<StepId>,

    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Step {
    pub fn new(step_id: impl Into<StepId>, step_name: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            step_name: step_name.into(),
            duration_minute: None,
            dependencies: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    /// Timer length in minutes, if this step offers a timer at all.
    pub fn timer_minutes(&self) -> Option<u32> {
        self.duration_minute.filter(|&m| m > 0)
    }

    /// Ingredients as a single display string (`"eggs, salt"`).
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_offers_no_timer() {
        let mut step = Step::new("1", "Rest the dough");
        assert_eq!(step.timer_minutes(), None);

        step.duration_minute = Some(0);
        assert_eq!(step.timer_minutes(), None);
        assert_eq!(step.duration_minute, Some(0));

        step.duration_minute = Some(12);
        assert_eq!(step.timer_minutes(), Some(12));
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let step: Step =
            serde_json::from_str(r#"{"step_id": "a", "step_name": "Boil water"}"#).unwrap();
        assert_eq!(step.duration_minute, None);
        assert!(step.dependencies.is_empty());
        assert!(step.ingredients.is_empty());
    }

    #[test]
    fn null_duration_is_none() {
        let step: Step = serde_json::from_str(
            r#"{"step_id": "a", "step_name": "Salt", "duration_minute": null, "ingredients": ["salt", "water"]}"#,
        )
        .unwrap();
        assert_eq!(step.duration_minute, None);
        assert_eq!(step.ingredients_text(), "salt, water");
    }
}
