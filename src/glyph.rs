use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use egui::epaint::text::Fonts;
use egui::{Color32, FontDefinitions, FontId};

/// Largest font atlas side we ask egui for
const MAX_ATLAS_SIDE: usize = 8192;

/// Coverage bitmap of a rasterized piece of text, tightly cropped to its ink
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Row-major coverage values in `0.0..=1.0`
    pub coverage: Vec<f32>,
}

impl GlyphBitmap {
    fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn coverage_at(&self, x: usize, y: usize) -> f32 {
        self.coverage[y * self.width + x]
    }
}

/// Rasterizes sticker text using the fonts bundled with egui.
///
/// Bitmaps are cached per (text, pixel size). Clones share the same fonts and cache.
#[derive(Clone)]
pub struct GlyphRasterizer {
    fonts: Fonts,
    cache: Rc<RefCell<HashMap<(String, u32), Rc<GlyphBitmap>>>>,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        // One atlas texel per output pixel; callers pick the pixel size.
        let fonts = Fonts::new(1.0, MAX_ATLAS_SIDE, FontDefinitions::default());
        Self {
            fonts,
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Rasterize `text` at `pixel_size` pixels per em
    pub fn rasterize(&self, text: &str, pixel_size: f32) -> Rc<GlyphBitmap> {
        let key = (text.to_owned(), pixel_size.to_bits());
        if let Some(bitmap) = self.cache.borrow().get(&key) {
            return Rc::clone(bitmap);
        }

        let bitmap = Rc::new(self.rasterize_uncached(text, pixel_size));
        log::debug!(
            "Rasterized {:?} at {}px: {}x{}",
            text,
            pixel_size,
            bitmap.width,
            bitmap.height
        );
        self.cache.borrow_mut().insert(key, Rc::clone(&bitmap));
        bitmap
    }

    fn rasterize_uncached(&self, text: &str, pixel_size: f32) -> GlyphBitmap {
        if text.is_empty() || !(pixel_size.is_finite() && pixel_size > 0.0) {
            return GlyphBitmap::empty();
        }

        let galley = self
            .fonts
            .layout_no_wrap(text.to_owned(), FontId::proportional(pixel_size), Color32::WHITE);
        // The layout call above uploads the glyphs, so the atlas is read afterwards.
        let atlas = self.fonts.image();
        let atlas_width = atlas.size[0];

        // Place every glyph box in galley pixel space.
        let mut placed = Vec::new();
        for row in &galley.rows {
            for glyph in &row.glyphs {
                let uv = &glyph.uv_rect;
                if uv.is_nothing() {
                    continue;
                }
                let x = (glyph.pos.x + uv.offset.x).round() as i64;
                let y = (glyph.pos.y + uv.offset.y).round() as i64;
                let w = uv.max[0].saturating_sub(uv.min[0]) as i64;
                let h = uv.max[1].saturating_sub(uv.min[1]) as i64;
                if w > 0 && h > 0 {
                    placed.push((x, y, w, h, uv.min));
                }
            }
        }

        let Some(min_x) = placed.iter().map(|p| p.0).min() else {
            return GlyphBitmap::empty();
        };
        let min_y = placed.iter().map(|p| p.1).min().unwrap_or(0);
        let max_x = placed.iter().map(|p| p.0 + p.2).max().unwrap_or(min_x);
        let max_y = placed.iter().map(|p| p.1 + p.3).max().unwrap_or(min_y);

        let width = (max_x - min_x) as usize;
        let height = (max_y - min_y) as usize;
        let mut coverage = vec![0.0_f32; width * height];

        for (x, y, w, h, uv_min) in placed {
            let dx = (x - min_x) as usize;
            let dy = (y - min_y) as usize;
            for j in 0..h as usize {
                for i in 0..w as usize {
                    let src = (uv_min[1] as usize + j) * atlas_width + uv_min[0] as usize + i;
                    let value = atlas.pixels.get(src).copied().unwrap_or(0.0);
                    let dst = &mut coverage[(dy + j) * width + dx + i];
                    *dst = dst.max(value);
                }
            }
        }

        GlyphBitmap {
            width,
            height,
            coverage,
        }
    }
}
