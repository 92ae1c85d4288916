use egui::{Pos2, Rect, Vec2};

use crate::drawable::common::STICKER_SIZE;
use crate::surface::Surface;

/// A glyph placed on the canvas, centered on its position
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    glyph: String,
    position: Pos2,
    /// Side of the square bounding box used for centering and hit-testing
    size: f32,
}

impl Sticker {
    pub fn new(glyph: impl Into<String>, position: Pos2) -> Self {
        Self::with_size(glyph, position, STICKER_SIZE)
    }

    pub fn with_size(glyph: impl Into<String>, position: Pos2, size: f32) -> Self {
        Self {
            glyph: glyph.into(),
            position,
            size,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Moves the sticker while it is being dragged
    pub(crate) fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    /// True iff `pos` lies within half the bounding box on each axis
    pub fn contains(&self, pos: Pos2) -> bool {
        let half = self.size / 2.0;
        (pos.x - self.position.x).abs() <= half && (pos.y - self.position.y).abs() <= half
    }

    pub fn render(&self, target: &mut Surface) {
        target.draw_glyph(&self.glyph, self.position, self.size);
    }
}
