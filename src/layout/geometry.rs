// src/layout/geometry.rs

//! Pixel geometry: node sizing and edge curves.

use serde::Serialize;

use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Height of a node holding the given wrapped text.
///
/// Title always takes at least one line; the ingredient block adds its gap
/// only when it has lines; timed steps reserve room for timer controls.
pub fn node_height(
    cfg: &LayoutConfig,
    title_lines: usize,
    ingredient_lines: usize,
    has_timer: bool,
) -> f64 {
    let title = title_lines.max(1) as f64 * cfg.line_height;
    let ingredients = ingredient_lines as f64 * cfg.line_height;
    let ingredient_gap = if ingredient_lines > 0 {
        cfg.ingredient_gap
    } else {
        0.0
    };
    let timer = if has_timer { cfg.timer_block_height } else { 0.0 };

    let computed = cfg.title_top_padding
        + title
        + ingredient_gap
        + ingredients
        + cfg.node_bottom_padding
        + timer;
    computed.max(cfg.min_node_height)
}

/// Width of a row of `count` nodes including the gaps between them.
pub fn row_width(cfg: &LayoutConfig, count: usize) -> f64 {
    count as f64 * cfg.node_width + count.saturating_sub(1) as f64 * cfg.column_gap
}

/// Cubic Bézier from a source node's bottom-centre to a target's top-centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl EdgeCurve {
    /// Vertical S-curve: control points sit straight below the start and
    /// straight above the end.
    pub fn between(start: Point, end: Point, offset: f64) -> Self {
        Self {
            start,
            control1: Point::new(start.x, start.y + offset),
            control2: Point::new(end.x, end.y - offset),
            end,
        }
    }

    /// SVG path data, e.g. `M 138 84 C 138 108, 138 86, 138 110`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}
