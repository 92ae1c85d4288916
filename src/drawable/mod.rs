use egui::Pos2;

mod common;
pub(crate) mod preview;
pub(crate) mod sticker;
pub(crate) mod stroke;

pub use common::STICKER_SIZE;
pub use preview::{PREVIEW_ALPHA, Preview};
pub use sticker::Sticker;
pub use stroke::Stroke;

use crate::surface::Surface;

/// Enumeration of everything the command log can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl Drawable {
    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Stroke(_) => "stroke",
            Drawable::Sticker(_) => "sticker",
        }
    }

    /// Draw onto the given target; the only side effect is on the target's pixels
    pub fn render(&self, target: &mut Surface) {
        match self {
            Drawable::Stroke(s) => s.render(target),
            Drawable::Sticker(s) => s.render(target),
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Drawable::Stroke(s) => Some(s),
            Drawable::Sticker(_) => None,
        }
    }

    pub fn as_sticker(&self) -> Option<&Sticker> {
        match self {
            Drawable::Sticker(s) => Some(s),
            Drawable::Stroke(_) => None,
        }
    }

    pub(crate) fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Drawable::Stroke(s) => Some(s),
            Drawable::Sticker(_) => None,
        }
    }

    pub(crate) fn as_sticker_mut(&mut self) -> Option<&mut Sticker> {
        match self {
            Drawable::Sticker(s) => Some(s),
            Drawable::Stroke(_) => None,
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Drawable::Stroke(stroke)
    }
}

impl From<Sticker> for Drawable {
    fn from(sticker: Sticker) -> Self {
        Drawable::Sticker(sticker)
    }
}

/// Factory functions for creating drawables
pub mod factory {
    use super::*;

    /// Create a stroke drawable from a complete point list
    pub fn create_stroke(points: Vec<Pos2>, thickness: f32) -> Drawable {
        Drawable::Stroke(Stroke::from_points(points, thickness))
    }

    /// Create a sticker drawable with the default bounding box
    pub fn create_sticker(glyph: &str, position: Pos2) -> Drawable {
        Drawable::Sticker(Sticker::new(glyph, position))
    }
}
