// src/layout/mod.rs

//! Layered graph layout for the recipe view.
//!
//! - [`layering`] assigns every step a level (longest-path layering).
//! - [`wrap`] word-wraps node labels.
//! - [`geometry`] sizes nodes and builds edge curves.
//!
//! [`compute`] ties them together. The result is a pure function of the
//! step list, the completion set and the config, and is recomputed whenever
//! either of the first two changes.

pub mod geometry;
pub mod layering;
pub mod wrap;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::dag::readiness::status_of;
use crate::dag::{StepGraph, StepId};
use crate::types::StepStatus;

pub use geometry::{EdgeCurve, Point};
pub use layering::{Layering, assign_levels};
pub use wrap::wrap_text;

/// A positioned step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub step_id: StepId,
    pub level: usize,
    /// Column within the node's row.
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title_lines: Vec<String>,
    pub ingredient_lines: Vec<String>,
    pub timer_minutes: Option<u32>,
    pub status: StepStatus,
}

impl LayoutNode {
    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub from: StepId,
    pub to: StepId,
    pub curve: EdgeCurve,
}

/// Full layout of one recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Step ids per row, top to bottom.
    pub rows: Vec<Vec<StepId>>,
    pub width: f64,
    pub height: f64,
}

impl GraphLayout {
    pub fn node(&self, step_id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.step_id == step_id)
    }

    pub fn level_of(&self, step_id: &str) -> Option<usize> {
        self.node(step_id).map(|n| n.level)
    }

    /// `step_id -> level` for every node.
    pub fn levels(&self) -> HashMap<&str, usize> {
        self.nodes
            .iter()
            .map(|n| (n.step_id.as_str(), n.level))
            .collect()
    }
}

/// Lay out `graph` for display.
pub fn compute(graph: &StepGraph, completed: &BTreeSet<StepId>, cfg: &LayoutConfig) -> GraphLayout {
    if graph.is_empty() {
        return GraphLayout::default();
    }

    let layering = assign_levels(graph);
    let steps = graph.steps();

    // Wrap every label once; sizes feed both row heights and nodes.
    let labels: Vec<(Vec<String>, Vec<String>, f64)> = steps
        .iter()
        .map(|step| {
            let title = wrap::wrap_text(&step.step_name, cfg.max_chars_per_line);
            let ingredients = wrap::wrap_ingredients(&step.ingredients, cfg.max_chars_per_line);
            let height = geometry::node_height(
                cfg,
                title.len(),
                ingredients.len(),
                step.timer_minutes().is_some(),
            );
            (title, ingredients, height)
        })
        .collect();

    let rows = layering.rows();
    let max_cols = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let grid_width = geometry::row_width(cfg, max_cols);

    let row_heights: Vec<f64> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|&i| labels[i].2)
                .fold(cfg.min_node_height, f64::max)
        })
        .collect();

    let mut nodes = Vec::with_capacity(steps.len());
    let mut node_index: Vec<usize> = vec![0; steps.len()];
    let mut row_top = cfg.top_padding;

    for (row, &row_height) in rows.iter().zip(&row_heights) {
        let left = cfg.horizontal_padding + (grid_width - geometry::row_width(cfg, row.len())) / 2.0;

        for (column, &i) in row.iter().enumerate() {
            let step = &steps[i];
            let (title_lines, ingredient_lines, height) = labels[i].clone();

            node_index[i] = nodes.len();
            nodes.push(LayoutNode {
                step_id: step.step_id.clone(),
                level: layering.level(i),
                column,
                x: left + column as f64 * (cfg.node_width + cfg.column_gap),
                y: row_top,
                width: cfg.node_width,
                height,
                title_lines,
                ingredient_lines,
                timer_minutes: step.timer_minutes(),
                status: status_of(step, completed),
            });
        }

        row_top += row_height + cfg.row_gap;
    }

    // Edges follow node order, then each node's dependency order.
    let mut edges = Vec::new();
    for node in &nodes {
        let Some(i) = graph.position(&node.step_id) else {
            continue;
        };
        for &d in graph.dependency_indices(i) {
            let from = &nodes[node_index[d]];
            edges.push(LayoutEdge {
                from: from.step_id.clone(),
                to: node.step_id.clone(),
                curve: EdgeCurve::between(
                    from.bottom_center(),
                    node.top_center(),
                    cfg.edge_curve_offset,
                ),
            });
        }
    }

    let width = grid_width + cfg.horizontal_padding * 2.0;
    let height = row_heights.iter().sum::<f64>()
        + rows.len().saturating_sub(1) as f64 * cfg.row_gap
        + cfg.top_padding
        + cfg.bottom_padding;

    let rows: Vec<Vec<StepId>> = rows
        .iter()
        .map(|row| row.iter().map(|&i| steps[i].step_id.clone()).collect())
        .collect();

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        rows = rows.len(),
        width,
        height,
        "computed graph layout"
    );

    GraphLayout {
        nodes,
        edges,
        rows,
        width,
        height,
    }
}
