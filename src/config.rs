use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable settings for the sketch surface.
///
/// Every field has a default, so a config file only needs the keys it wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Size of the on-screen drawing surface in logical pixels
    pub canvas_size: [u32; 2],
    /// Size of the exported image in pixels
    pub export_size: [u32; 2],
    pub pencil_thickness: f32,
    pub marker_thickness: f32,
    pub thick_marker_thickness: f32,
    /// Side of the square sticker bounding box
    pub sticker_size: f32,
    /// Opacity used when rendering the cursor preview
    pub preview_alpha: f32,
    /// Sticker glyphs available at startup
    pub stickers: Vec<String>,
    /// File written by the native export button
    pub export_path: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: [256, 256],
            export_size: [1024, 1024],
            pencil_thickness: 2.0,
            marker_thickness: 5.0,
            thick_marker_thickness: 10.0,
            sticker_size: crate::drawable::STICKER_SIZE,
            preview_alpha: crate::drawable::PREVIEW_ALPHA,
            stickers: vec!["🔥".to_owned(), "⭐".to_owned(), "🌈".to_owned()],
            export_path: "sketch.png".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, [w, h]) in [("canvas_size", self.canvas_size), ("export_size", self.export_size)] {
            if w == 0 || h == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-zero, got {w}x{h}")));
            }
        }

        for (name, value) in [
            ("pencil_thickness", self.pencil_thickness),
            ("marker_thickness", self.marker_thickness),
            ("thick_marker_thickness", self.thick_marker_thickness),
            ("sticker_size", self.sticker_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !(self.preview_alpha > 0.0 && self.preview_alpha <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "preview_alpha must be in (0, 1], got {}",
                self.preview_alpha
            )));
        }

        Ok(())
    }
}
