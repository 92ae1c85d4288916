use egui::{PointerButton, Pos2, Vec2};

use crate::command::CommandLog;
use crate::config::SketchConfig;
use crate::drawable::{Preview, Sticker, Stroke};
use crate::error::ExportResult;
use crate::event::{EventBus, SketchEvent};
use crate::export;
use crate::glyph::GlyphRasterizer;
use crate::tool::{StickerPalette, Thicknesses, Tool, ToolKind};

/// What the held pointer is currently doing to the log
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    /// Growing the stroke at this index of the active stack
    Drawing { index: usize },
    /// Moving the sticker at this index, keeping the grab offset
    Dragging { index: usize, grab_offset: Vec2 },
}

/// Owns everything the sketch surface mutates: the command log, the current tool,
/// the sticker palette and the cursor preview.
///
/// Every mutation publishes a [`SketchEvent`] on the event bus; nothing here renders.
#[derive(Debug)]
pub struct SketchContext {
    log: CommandLog,
    tool: Tool,
    thicknesses: Thicknesses,
    palette: StickerPalette,
    /// Last known pointer position over the canvas
    cursor: Option<Pos2>,
    gesture: Option<Gesture>,
    event_bus: EventBus,
    config: SketchConfig,
    glyphs: GlyphRasterizer,
}

impl Default for SketchContext {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl SketchContext {
    pub fn new(config: SketchConfig) -> Self {
        Self::with_glyphs(config, GlyphRasterizer::new())
    }

    /// Create a context that shares an existing glyph rasterizer
    pub fn with_glyphs(config: SketchConfig, glyphs: GlyphRasterizer) -> Self {
        let thicknesses = Thicknesses::from(&config);
        Self {
            log: CommandLog::new(),
            tool: Tool::drawing(ToolKind::Pencil, thicknesses.pencil),
            thicknesses,
            palette: StickerPalette::new(config.stickers.iter().cloned()),
            cursor: None,
            gesture: None,
            event_bus: EventBus::new(),
            config,
            glyphs,
        }
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn palette(&self) -> &StickerPalette {
        &self.palette
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn glyphs(&self) -> &GlyphRasterizer {
        &self.glyphs
    }

    /// True while a stroke is being drawn or a sticker dragged
    pub fn is_busy(&self) -> bool {
        self.gesture.is_some()
    }

    /// The cursor indicator for the current tool, if the pointer is over the canvas
    pub fn preview(&self) -> Option<Preview> {
        let position = self.cursor?;
        Some(match self.tool.sticker_glyph() {
            Some(glyph) if self.tool.kind() == ToolKind::Sticker => Preview::Sticker {
                position,
                glyph: glyph.to_owned(),
                size: self.config.sticker_size,
            },
            _ => Preview::Cursor {
                position,
                thickness: self.tool.thickness(),
            },
        })
    }

    fn notify(&self, event: SketchEvent) {
        self.event_bus.emit(event);
    }

    fn set_cursor(&mut self, position: Option<Pos2>) {
        self.cursor = position;
        self.notify(SketchEvent::CursorChanged);
    }

    /// Ends the current gesture. Whatever the stroke has is kept as is.
    fn seal(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Drawing { index }) => {
                let points = self.log.active().get(index).and_then(|d| d.as_stroke()).map(|s| s.points().len());
                log::debug!("Sealed stroke {} with {} points", index, points.unwrap_or(0));
                self.notify(SketchEvent::DrawingChanged);
            }
            Some(Gesture::Dragging { index, .. }) => {
                log::debug!("Released sticker {}", index);
                self.notify(SketchEvent::DrawingChanged);
            }
            None => {}
        }
    }

    // Pointer events -------------------------------------------------------

    pub fn pointer_down(&mut self, position: Pos2, button: PointerButton) {
        self.seal();
        self.cursor = Some(position);

        match button {
            PointerButton::Primary => match self.tool.sticker_glyph() {
                Some(glyph) if self.tool.kind() == ToolKind::Sticker => {
                    let sticker = Sticker::with_size(glyph, position, self.config.sticker_size);
                    self.log.append(sticker);
                    self.gesture = Some(Gesture::Dragging {
                        index: self.log.len() - 1,
                        grab_offset: Vec2::ZERO,
                    });
                }
                _ => {
                    self.log.append(Stroke::new(position, self.tool.thickness()));
                    self.gesture = Some(Gesture::Drawing {
                        index: self.log.len() - 1,
                    });
                }
            },
            PointerButton::Secondary => {
                if let Some(index) = self.log.topmost_sticker_at(position) {
                    let grab_offset = self.log.active()[index]
                        .as_sticker()
                        .map_or(Vec2::ZERO, |s| s.position() - position);
                    log::debug!("Picked up sticker {}", index);
                    self.gesture = Some(Gesture::Dragging { index, grab_offset });
                }
            }
            other => {
                log::debug!("Ignoring {:?} button press", other);
            }
        }

        self.notify(SketchEvent::DrawingChanged);
        self.notify(SketchEvent::CursorChanged);
    }

    pub fn pointer_move(&mut self, position: Pos2, button_held: bool) {
        self.set_cursor(Some(position));

        let Some(gesture) = self.gesture else {
            return;
        };
        if !button_held {
            // The release happened somewhere we did not see it.
            self.seal();
            return;
        }

        let moved = match gesture {
            Gesture::Drawing { index } => self.log.stroke_mut(index).map(|s| s.grow(position)),
            Gesture::Dragging { index, grab_offset } => self
                .log
                .sticker_mut(index)
                .map(|s| s.set_position(position + grab_offset)),
        };

        if moved.is_some() {
            self.notify(SketchEvent::DrawingChanged);
        } else {
            log::warn!("Gesture target {:?} no longer in the log", gesture);
            self.gesture = None;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.gesture.is_some() {
            self.seal();
        } else {
            self.notify(SketchEvent::DrawingChanged);
        }
    }

    pub fn pointer_enter(&mut self, position: Pos2) {
        self.set_cursor(Some(position));
    }

    pub fn pointer_leave(&mut self) {
        self.seal();
        self.set_cursor(None);
    }

    // Tool selection -------------------------------------------------------

    /// Switches tool. Picking the sticker tool reuses the current glyph or the first in the palette.
    pub fn select_tool(&mut self, kind: ToolKind) {
        let tool = if kind == ToolKind::Sticker {
            let glyph = self
                .tool
                .sticker_glyph()
                .or_else(|| self.palette.glyphs().first().map(String::as_str));
            match glyph {
                Some(glyph) => Tool::sticker(glyph),
                None => {
                    log::warn!("No sticker available to select");
                    return;
                }
            }
        } else {
            Tool::drawing(kind, self.thicknesses.of(kind))
        };

        self.set_tool(tool);
    }

    pub fn select_sticker(&mut self, glyph: &str) {
        self.set_tool(Tool::sticker(glyph));
    }

    /// Adds a user supplied glyph to the palette and selects it. Blank input is ignored.
    pub fn register_custom_sticker(&mut self, glyph: &str) {
        let glyph = glyph.trim();
        if glyph.is_empty() {
            log::warn!("Ignoring empty custom sticker");
            return;
        }
        if self.palette.register(glyph) {
            log::info!("Registered custom sticker {:?}", glyph);
            self.notify(SketchEvent::StickersChanged);
        }
        self.select_sticker(glyph);
    }

    fn set_tool(&mut self, tool: Tool) {
        log::info!("Tool changed: {:?} -> {:?}", self.tool.kind(), tool.kind());
        self.tool = tool;
        self.notify(SketchEvent::ToolChanged);
        // The preview follows the tool.
        self.notify(SketchEvent::CursorChanged);
    }

    // History --------------------------------------------------------------

    pub fn undo(&mut self) {
        self.gesture = None;
        self.log.undo();
        self.notify(SketchEvent::DrawingChanged);
    }

    pub fn redo(&mut self) {
        self.gesture = None;
        self.log.redo();
        self.notify(SketchEvent::DrawingChanged);
    }

    pub fn clear(&mut self) {
        self.gesture = None;
        self.log.clear();
        self.notify(SketchEvent::DrawingChanged);
    }

    // Export ---------------------------------------------------------------

    /// Rasterize the active log at `size` pixels and encode it as PNG
    pub fn export_png(&self, size: [u32; 2]) -> ExportResult<Vec<u8>> {
        export::export_png(self.log.active(), self.config.canvas_size, size, &self.glyphs)
    }
}
