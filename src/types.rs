// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Readiness of a single step against the current completion set.
///
/// - `Completed`: the user checked the step off.
/// - `Ready`: every dependency id is completed (vacuously true without deps).
/// - `Blocked`: at least one dependency id is not completed yet. Dangling ids
///   never complete, so a step depending on one stays blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Ready,
    Blocked,
}

impl StepStatus {
    /// Whether the user may toggle this step interactively.
    ///
    /// Blocked steps can be neither checked off nor clicked; the session
    /// rejects them before they reach the repository's `toggle`.
    pub fn is_actionable(self) -> bool {
        !matches!(self, StepStatus::Blocked)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Ready => "ready",
            StepStatus::Blocked => "blocked",
        };
        f.write_str(s)
    }
}

/// Output format for the `layout` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "invalid output format: {other} (expected \"text\" or \"json\")"
            )),
        }
    }
}
