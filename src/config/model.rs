// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [layout]
/// node_width = 220
/// max_chars_per_line = 28
///
/// [timer]
/// tick_millis = 1000
/// ```
///
/// All sections and fields are optional and fall back to the defaults below.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub timer: TimerSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (see `config::validate`) or [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub layout: LayoutConfig,
    pub timer: TimerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(layout: LayoutConfig, timer: TimerSection) -> Self {
        Self { layout, timer }
    }
}

/// `[layout]` section: pixel geometry of the graph view.
///
/// Defaults reproduce the web renderer the layout was designed for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    pub horizontal_padding: f64,
    pub top_padding: f64,
    pub bottom_padding: f64,
    /// Wrap width for step names and ingredient lists, in characters.
    pub max_chars_per_line: usize,
    pub line_height: f64,
    pub min_node_height: f64,
    pub title_top_padding: f64,
    /// Space between the title block and the ingredient block.
    pub ingredient_gap: f64,
    pub node_bottom_padding: f64,
    /// Extra height reserved for timer controls on timed steps.
    pub timer_block_height: f64,
    /// Vertical distance of the Bézier control points from edge anchors.
    pub edge_curve_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            column_gap: 24.0,
            row_gap: 26.0,
            horizontal_padding: 28.0,
            top_padding: 6.0,
            bottom_padding: 18.0,
            max_chars_per_line: 28,
            line_height: 13.0,
            min_node_height: 78.0,
            title_top_padding: 14.0,
            ingredient_gap: 8.0,
            node_bottom_padding: 12.0,
            timer_block_height: 20.0,
            edge_curve_offset: 24.0,
        }
    }
}

/// `[timer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimerSection {
    /// Period of the logical timer clock. One tick always removes one second
    /// from every running timer; a shorter period only speeds up the demo.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

impl TimerSection {
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_millis)
    }
}
