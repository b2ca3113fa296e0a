//! Named canvas sizes. All presets share the 3:4 portrait aspect of the reference drawing.

use crate::{
    config::model::Configuration,
    foundation::core::Canvas,
    foundation::error::{RidgeError, RidgeResult},
};

/// Preset names accepted by [`CanvasPreset::from_name`].
pub static CANVAS_PRESET_NAMES: &[&str] = &["portrait-600", "portrait-900", "portrait-1200"];

/// A named canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasPreset {
    /// 600 x 800.
    Portrait600,
    /// 900 x 1200.
    Portrait900,
    /// 1200 x 1600.
    Portrait1200,
}

impl CanvasPreset {
    /// Look up a preset by name.
    pub fn from_name(name: &str) -> RidgeResult<Self> {
        match name {
            "portrait-600" => Ok(Self::Portrait600),
            "portrait-900" => Ok(Self::Portrait900),
            "portrait-1200" => Ok(Self::Portrait1200),
            other => Err(RidgeError::invalid(
                "preset",
                format!(
                    "unknown preset '{other}' (expected one of: {})",
                    CANVAS_PRESET_NAMES.join(", ")
                ),
            )),
        }
    }

    /// Canvas dimensions for this preset.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Portrait600 => (600.0, 800.0),
            Self::Portrait900 => (900.0, 1200.0),
            Self::Portrait1200 => (1200.0, 1600.0),
        };
        Canvas { width, height }
    }

    /// Replace the canvas size of `config`; every other field is left alone.
    pub fn apply(self, config: &mut Configuration) {
        let canvas = self.canvas();
        config.width = canvas.width;
        config.height = canvas.height;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/presets.rs"]
mod tests;
