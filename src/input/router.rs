use crate::context::SketchContext;

use super::{Action, InputEvent};

/// Forwards a pointer event to the sketch context
pub fn route_event(event: &InputEvent, sketch: &mut SketchContext) {
    match *event {
        InputEvent::PointerDown { position, button } => sketch.pointer_down(position, button),
        InputEvent::PointerMove {
            position,
            button_held,
        } => sketch.pointer_move(position, button_held),
        InputEvent::PointerUp => sketch.pointer_up(),
        InputEvent::PointerEnter { position } => sketch.pointer_enter(position),
        InputEvent::PointerLeave => sketch.pointer_leave(),
    }
}

/// Applies a toolbar action to the sketch context
pub fn route_action(action: &Action, sketch: &mut SketchContext) {
    match action {
        Action::SelectTool(kind) => sketch.select_tool(*kind),
        Action::SelectSticker(glyph) => sketch.select_sticker(glyph),
        Action::RegisterCustomSticker(glyph) => sketch.register_custom_sticker(glyph),
        Action::Clear => sketch.clear(),
        Action::Undo => sketch.undo(),
        Action::Redo => sketch.redo(),
    }
}
