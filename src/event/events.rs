/// Change notifications published by the sketch context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchEvent {
    /// The command log changed (or an undo/redo was requested)
    DrawingChanged,
    /// The preview moved, changed shape or disappeared
    CursorChanged,
    /// A different tool was selected
    ToolChanged,
    /// The set of available sticker glyphs grew
    StickersChanged,
}

impl SketchEvent {
    /// Whether the canvas has to be redrawn in response
    pub fn needs_redraw(self) -> bool {
        matches!(
            self,
            SketchEvent::DrawingChanged | SketchEvent::CursorChanged | SketchEvent::ToolChanged
        )
    }
}
