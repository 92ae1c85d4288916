use egui::{Pos2, Vec2};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke,
    Transform,
};

use crate::glyph::{GlyphBitmap, GlyphRasterizer};

/// A raster render target.
///
/// Drawing coordinates are logical canvas units; the surface maps them to pixels with its
/// scale. If the pixmap could not be allocated the surface is unavailable and every draw
/// call is a no-op.
#[derive(Debug)]
pub struct Surface {
    pixmap: Option<Pixmap>,
    scale: Vec2,
    line_width: f32,
    alpha: f32,
    glyphs: GlyphRasterizer,
}

impl Surface {
    /// Creates a surface of `width`x`height` pixels drawing logical units at `scale`
    pub fn new(width: u32, height: u32, scale: Vec2, glyphs: GlyphRasterizer) -> Self {
        let pixmap = Pixmap::new(width, height);
        if pixmap.is_none() {
            log::warn!("Raster surface {}x{} unavailable, drawing disabled", width, height);
        }
        Self {
            pixmap,
            scale,
            line_width: 1.0,
            alpha: 1.0,
            glyphs,
        }
    }

    pub fn is_available(&self) -> bool {
        self.pixmap.is_some()
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub fn size(&self) -> [u32; 2] {
        self.pixmap
            .as_ref()
            .map_or([0, 0], |p| [p.width(), p.height()])
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets the global opacity applied to every subsequent draw call
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Resets every pixel to transparent
    pub fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(Color::TRANSPARENT);
        }
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale.x, self.scale.y)
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba(0.0, 0.0, 0.0, self.alpha).unwrap_or(Color::BLACK));
        paint.anti_alias = true;
        paint
    }

    /// Strokes a connected polyline with the current line width.
    ///
    /// Fewer than two points describe an empty path and draw nothing.
    pub fn stroke_polyline(&mut self, points: &[Pos2]) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for p in rest {
            builder.line_to(p.x, p.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = Stroke {
            width: self.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        let paint = self.paint();
        let transform = self.transform();
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    /// Fills a circle of the given diameter
    pub fn fill_circle(&mut self, center: Pos2, diameter: f32) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, diameter / 2.0) else {
            return;
        };
        let paint = self.paint();
        let transform = self.transform();
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    /// Draws `text` with its ink centered on `center`, sized to fit a `box_size` em square
    pub fn draw_glyph(&mut self, text: &str, center: Pos2, box_size: f32) {
        if self.pixmap.is_none() {
            return;
        }
        let pixel_size = box_size * (self.scale.x + self.scale.y) / 2.0;
        let bitmap = self.glyphs.rasterize(text, pixel_size);
        if bitmap.is_empty() {
            return;
        }
        let origin_x = (center.x * self.scale.x - bitmap.width as f32 / 2.0).round() as i64;
        let origin_y = (center.y * self.scale.y - bitmap.height as f32 / 2.0).round() as i64;
        let alpha = self.alpha;
        if let Some(pixmap) = &mut self.pixmap {
            blend_coverage(pixmap, &bitmap, origin_x, origin_y, alpha);
        }
    }

    /// Copies the pixels out as straight (non-premultiplied) RGBA
    pub fn to_rgba(&self) -> Vec<u8> {
        let Some(pixmap) = &self.pixmap else {
            return Vec::new();
        };
        pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

/// Composites black ink with the bitmap's coverage over the pixmap (source-over)
fn blend_coverage(pixmap: &mut Pixmap, bitmap: &GlyphBitmap, origin_x: i64, origin_y: i64, alpha: f32) {
    let width = pixmap.width() as i64;
    let height = pixmap.height() as i64;
    let pixels = pixmap.pixels_mut();

    for y in 0..bitmap.height {
        let py = origin_y + y as i64;
        if py < 0 || py >= height {
            continue;
        }
        for x in 0..bitmap.width {
            let px = origin_x + x as i64;
            if px < 0 || px >= width {
                continue;
            }
            let src_a = (bitmap.coverage_at(x, y).clamp(0.0, 1.0) * alpha * 255.0).round() as u32;
            if src_a == 0 {
                continue;
            }
            let dst = &mut pixels[(py * width + px) as usize];
            let keep = 255 - src_a;
            // Black source: only destination channels survive, scaled by (1 - src_a).
            let scale = |c: u8| ((c as u32 * keep + 127) / 255) as u8;
            let a = (src_a + (dst.alpha() as u32 * keep + 127) / 255).min(255) as u8;
            if let Some(blended) =
                PremultipliedColorU8::from_rgba(scale(dst.red()), scale(dst.green()), scale(dst.blue()), a)
            {
                *dst = blended;
            }
        }
    }
}
