use std::io::Cursor;

use egui::vec2;
use image::{ImageFormat, RgbaImage};

use crate::drawable::Drawable;
use crate::error::{ExportError, ExportResult};
use crate::glyph::GlyphRasterizer;
use crate::surface::Surface;

/// Renders `drawables` onto a fresh surface of `export_size` pixels.
///
/// Logical canvas units are scaled by `export_size / source_size` on each axis. The preview
/// is never part of an export.
pub fn render_export(
    drawables: &[Drawable],
    source_size: [u32; 2],
    export_size: [u32; 2],
    glyphs: &GlyphRasterizer,
) -> ExportResult<Surface> {
    for [width, height] in [source_size, export_size] {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidSize { width, height });
        }
    }

    let scale = vec2(
        export_size[0] as f32 / source_size[0] as f32,
        export_size[1] as f32 / source_size[1] as f32,
    );
    let mut surface = Surface::new(export_size[0], export_size[1], scale, glyphs.clone());
    if !surface.is_available() {
        return Err(ExportError::SurfaceUnavailable);
    }

    surface.clear();
    for drawable in drawables {
        drawable.render(&mut surface);
    }
    Ok(surface)
}

/// Encodes the surface's pixels as PNG
pub fn encode_png(surface: &Surface) -> ExportResult<Vec<u8>> {
    let [width, height] = surface.size();
    let image = RgbaImage::from_raw(width, height, surface.to_rgba()).ok_or(ExportError::SurfaceUnavailable)?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders `drawables` at `export_size` and returns the PNG encoding
pub fn export_png(
    drawables: &[Drawable],
    source_size: [u32; 2],
    export_size: [u32; 2],
    glyphs: &GlyphRasterizer,
) -> ExportResult<Vec<u8>> {
    let surface = render_export(drawables, source_size, export_size, glyphs)?;
    let bytes = encode_png(&surface)?;
    log::info!(
        "Exported {} drawables at {}x{} ({} bytes)",
        drawables.len(),
        export_size[0],
        export_size[1],
        bytes.len()
    );
    Ok(bytes)
}
