// src/config/validate.rs

use crate::config::model::{ConfigFile, LayoutConfig, RawConfigFile, TimerSection};
use crate::errors::{Result, StepdagError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::StepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_layout(&raw.layout)?;
        validate_timer(&raw.timer)?;
        Ok(ConfigFile::new_unchecked(raw.layout, raw.timer))
    }
}

fn validate_layout(layout: &LayoutConfig) -> Result<()> {
    if layout.max_chars_per_line == 0 {
        return Err(StepdagError::ConfigError(
            "[layout].max_chars_per_line must be >= 1 (got 0)".to_string(),
        ));
    }

    let positive = [
        ("node_width", layout.node_width),
        ("line_height", layout.line_height),
    ];
    for (name, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(StepdagError::ConfigError(format!(
                "[layout].{name} must be a positive number (got {value})"
            )));
        }
    }

    let non_negative = [
        ("column_gap", layout.column_gap),
        ("row_gap", layout.row_gap),
        ("horizontal_padding", layout.horizontal_padding),
        ("top_padding", layout.top_padding),
        ("bottom_padding", layout.bottom_padding),
        ("min_node_height", layout.min_node_height),
        ("title_top_padding", layout.title_top_padding),
        ("ingredient_gap", layout.ingredient_gap),
        ("node_bottom_padding", layout.node_bottom_padding),
        ("timer_block_height", layout.timer_block_height),
        ("edge_curve_offset", layout.edge_curve_offset),
    ];
    for (name, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            return Err(StepdagError::ConfigError(format!(
                "[layout].{name} must be >= 0 (got {value})"
            )));
        }
    }

    Ok(())
}

fn validate_timer(timer: &TimerSection) -> Result<()> {
    if timer.tick_millis == 0 {
        return Err(StepdagError::ConfigError(
            "[timer].tick_millis must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
    }

    #[test]
    fn rejects_zero_wrap_width() {
        let mut raw = RawConfigFile::default();
        raw.layout.max_chars_per_line = 0;

        match ConfigFile::try_from(raw) {
            Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("max_chars_per_line")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_gap() {
        let mut raw = RawConfigFile::default();
        raw.layout.row_gap = -1.0;
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn rejects_zero_tick() {
        let mut raw = RawConfigFile::default();
        raw.timer.tick_millis = 0;
        assert!(ConfigFile::try_from(raw).is_err());
    }
}
