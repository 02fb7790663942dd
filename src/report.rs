// src/report.rs

//! Plain-text and JSON renderings of session state for the CLI.

use std::fmt::Write as _;

use serde::Serialize;

use crate::dag::readiness::Classification;
use crate::dag::{Step, StepGraph};
use crate::layout::GraphLayout;
use crate::timer::{TimerSnapshot, TimerState, format_clock};

fn step_line(out: &mut String, marker: &str, step: &Step) {
    let _ = write!(out, "  {marker} [{}] {}", step.step_id, step.step_name);
    if !step.ingredients.is_empty() {
        let _ = write!(out, " ({})", step.ingredients_text());
    }
    out.push('\n');
}

const BAR_CELLS: usize = 10;

/// `[#####-----]` for the remaining fraction of a timer.
fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction * BAR_CELLS as f64).round() as usize).min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

fn timer_line(out: &mut String, step: &Step, timer: Option<&TimerState>, expired: bool) {
    let Some(minutes) = step.timer_minutes() else {
        return;
    };
    let remaining = timer.map_or(u64::from(minutes) * 60, |t| t.remaining_seconds);
    let running = timer.is_some_and(|t| t.is_running);
    let fraction = timer.map_or(1.0, |t| t.progress(minutes));

    let state = if expired {
        "done!"
    } else if running {
        "running"
    } else {
        "stopped"
    };
    let _ = writeln!(
        out,
        "      timer {} / {}:00 {} ({state})",
        format_clock(remaining),
        minutes,
        progress_bar(fraction)
    );
}

/// Render the checklist with "Now", "Next up" and "Completed" sections.
pub fn render_checklist(
    classification: &Classification<'_>,
    timers: &TimerSnapshot,
    total: usize,
) -> String {
    let mut out = String::new();
    let done = classification.completed.len();
    let _ = writeln!(out, "Progress: {done}/{total} steps completed");

    if !classification.ready.is_empty() {
        let _ = writeln!(out, "\nNow ({}):", classification.ready.len());
        for step in &classification.ready {
            let expired = timers.completed.contains(&step.step_id);
            step_line(&mut out, if expired { "[!]" } else { "[ ]" }, step);
            timer_line(&mut out, step, timers.get(&step.step_id), expired);
        }
    }

    if !classification.blocked.is_empty() {
        let _ = writeln!(out, "\nNext up ({}):", classification.blocked.len());
        for blocked in &classification.blocked {
            step_line(&mut out, " - ", blocked.step);
            if !blocked.waiting_for.is_empty() {
                let _ = writeln!(out, "      Waiting for: {}", blocked.waiting_for.join(", "));
            }
        }
    }

    if !classification.completed.is_empty() {
        let _ = writeln!(out, "\nCompleted ({done}):");
        for step in &classification.completed {
            step_line(&mut out, "[x]", step);
        }
    }

    if total > 0 && classification.all_done() {
        let _ = writeln!(out, "\nAll steps completed! Enjoy your meal!");
    }

    out
}

/// Human-readable summary of a layout: one line per row, plus cycle notes.
pub fn render_layout_text(graph: &StepGraph, layout: &GraphLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Canvas {}x{} ({} nodes, {} edges)",
        layout.width,
        layout.height,
        layout.nodes.len(),
        layout.edges.len()
    );

    for ids in &layout.rows {
        // Rows are dense but levels skip numbers after the cycle fallback.
        let Some(level) = ids.first().and_then(|id| layout.level_of(id)) else {
            continue;
        };
        let _ = writeln!(out, "\nLevel {level}:");
        for id in ids {
            let Some(node) = layout.node(id) else {
                continue;
            };
            let _ = writeln!(
                out,
                "  [{}] {:<9} at ({}, {}) {}x{}  {}",
                node.step_id,
                node.status.to_string(),
                node.x,
                node.y,
                node.width,
                node.height,
                node.title_lines.join(" / ")
            );
        }
    }

    let cycles = graph.cycles();
    if !cycles.is_empty() {
        let _ = writeln!(out, "\nDependency cycles (placed below the deepest level):");
        for cycle in cycles {
            let _ = writeln!(out, "  {}", cycle.join(" -> "));
        }
    }

    out
}

#[derive(Serialize)]
struct LayoutDocument<'a> {
    #[serde(flatten)]
    layout: &'a GraphLayout,
    edge_paths: Vec<String>,
}

/// Full layout as pretty-printed JSON, with SVG path data for every edge.
pub fn render_layout_json(layout: &GraphLayout) -> serde_json::Result<String> {
    let doc = LayoutDocument {
        layout,
        edge_paths: layout.edges.iter().map(|e| e.curve.to_svg_path()).collect(),
    };
    serde_json::to_string_pretty(&doc)
}
