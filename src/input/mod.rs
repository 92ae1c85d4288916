use egui::{PointerButton, Pos2, Rect, Response};

mod router;
pub use router::{route_action, route_event};

use crate::tool::ToolKind;

/// Pointer input in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        position: Pos2,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        position: Pos2,
        /// Whether any button is currently held down
        button_held: bool,
    },
    /// Mouse button was released
    PointerUp,
    /// Mouse entered the canvas
    PointerEnter { position: Pos2 },
    /// Mouse left the canvas
    PointerLeave,
}

/// Button-level commands from the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTool(ToolKind),
    SelectSticker(String),
    RegisterCustomSticker(String),
    Clear,
    Undo,
    Redo,
}

const TRACKED_BUTTONS: [PointerButton; 2] = [PointerButton::Primary, PointerButton::Secondary];

/// Turns raw egui pointer state into [`InputEvent`]s relative to the canvas
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last pointer position inside the canvas, canvas-relative
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// `canvas` is the response of the widget the sketch is painted into. The pointer only
    /// counts as over the canvas when no other layer (a window, a popup) covers it there.
    pub fn process_input(&mut self, canvas: &Response) -> Vec<InputEvent> {
        let owns_pointer = canvas.contains_pointer();
        canvas.ctx.input(|input| {
            let pointer = &input.pointer;
            let mut pressed = Vec::new();
            let mut released = false;
            let mut held = false;
            for button in TRACKED_BUTTONS {
                if pointer.button_pressed(button) {
                    pressed.push(button);
                }
                released |= pointer.button_released(button);
                held |= pointer.button_down(button);
            }
            let hover_pos = pointer.hover_pos().filter(|_| owns_pointer);
            self.translate(hover_pos, canvas.rect, &pressed, held, released)
        })
    }

    /// Core of [`Self::process_input`], separated from egui's input state
    pub fn translate(
        &mut self,
        hover_pos: Option<Pos2>,
        canvas_rect: Rect,
        pressed: &[PointerButton],
        held: bool,
        released: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = hover_pos
            .filter(|pos| canvas_rect.contains(*pos))
            .map(|pos| (pos - canvas_rect.min).to_pos2());

        match local {
            Some(position) => {
                if self.last_pointer_pos.is_none() {
                    events.push(InputEvent::PointerEnter { position });
                }
                for &button in pressed {
                    events.push(InputEvent::PointerDown { position, button });
                }
                if Some(position) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        position,
                        button_held: held,
                    });
                }
                if released {
                    events.push(InputEvent::PointerUp);
                }
            }
            None if self.last_pointer_pos.is_some() => {
                events.push(InputEvent::PointerLeave);
            }
            None => {}
        }

        self.last_pointer_pos = local;
        events
    }
}
