use egui::{Color32, ColorImage, Painter, Rect, TextureHandle, TextureOptions, pos2, vec2};

use crate::context::SketchContext;
use crate::event::RedrawFlag;
use crate::surface::Surface;

/// Clears `target` and replays the active log, then the preview on top
pub fn render_scene(sketch: &SketchContext, target: &mut Surface) {
    target.clear();
    for drawable in sketch.log().active() {
        drawable.render(target);
    }
    if let Some(preview) = sketch.preview() {
        preview.render(target, sketch.config().preview_alpha);
    }
}

/// The render loop: keeps the on-screen surface in sync with the sketch and shows it
pub struct Renderer {
    surface: Surface,
    redraw: RedrawFlag,
    texture: Option<TextureHandle>,
    /// Surface changed since it was last uploaded
    texture_stale: bool,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("surface", &self.surface)
            .field("redraw", &self.redraw)
            .field("has_texture", &self.texture.is_some())
            .field("texture_stale", &self.texture_stale)
            .finish()
    }
}

impl Renderer {
    /// Creates the screen surface and subscribes to the sketch's change notifications
    pub fn new(sketch: &SketchContext) -> Self {
        let [width, height] = sketch.config().canvas_size;
        let surface = Surface::new(width, height, vec2(1.0, 1.0), sketch.glyphs().clone());
        let redraw = RedrawFlag::new();
        sketch.event_bus().subscribe(Box::new(redraw.clone()));
        Self {
            surface,
            redraw,
            texture: None,
            texture_stale: true,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.is_dirty()
    }

    /// Redraws if anything changed since the last frame. Returns whether it did.
    pub fn update(&mut self, sketch: &SketchContext) -> bool {
        if !self.redraw.take() {
            return false;
        }
        render_scene(sketch, &mut self.surface);
        self.texture_stale = true;
        true
    }

    /// Uploads the surface if needed and paints it into `rect`
    pub fn present(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let Some(pixmap) = self.surface.pixmap() else {
            return;
        };
        if self.texture_stale || self.texture.is_none() {
            let size = [pixmap.width() as usize, pixmap.height() as usize];
            let image = ColorImage::from_rgba_premultiplied(size, pixmap.data());
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => self.texture = Some(ctx.load_texture("sketch_canvas", image, TextureOptions::LINEAR)),
            }
            self.texture_stale = false;
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}
