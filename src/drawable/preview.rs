use egui::Pos2;

use crate::surface::Surface;

/// Opacity the preview is drawn with unless configured otherwise
pub const PREVIEW_ALPHA: f32 = 0.5;

/// Ephemeral cursor indicator for the current tool.
///
/// Never stored in the command log and never exported.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Filled circle showing the pen thickness
    Cursor { position: Pos2, thickness: f32 },
    /// The sticker glyph that a click would place
    Sticker { position: Pos2, glyph: String, size: f32 },
}

impl Preview {
    pub fn position(&self) -> Pos2 {
        match self {
            Preview::Cursor { position, .. } | Preview::Sticker { position, .. } => *position,
        }
    }

    /// Renders translucently, then leaves the target fully opaque again
    pub fn render(&self, target: &mut Surface, alpha: f32) {
        target.set_alpha(alpha);
        match self {
            Preview::Cursor {
                position,
                thickness,
            } => target.fill_circle(*position, *thickness),
            Preview::Sticker {
                position,
                glyph,
                size,
            } => target.draw_glyph(glyph, *position, *size),
        }
        target.set_alpha(1.0);
    }
}
