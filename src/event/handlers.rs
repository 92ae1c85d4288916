use std::cell::Cell;
use std::rc::Rc;

use crate::event::{EventHandler, SketchEvent};

/// Dirty flag raised by any event that changes what the canvas shows.
///
/// Clones share the flag: subscribe one clone, poll the other from the render loop.
/// Several events within one frame coalesce into a single redraw.
#[derive(Debug, Clone)]
pub struct RedrawFlag {
    dirty: Rc<Cell<bool>>,
}

impl Default for RedrawFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawFlag {
    /// Starts dirty so the first frame is always drawn
    pub fn new() -> Self {
        Self {
            dirty: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn mark(&self) {
        self.dirty.set(true);
    }

    /// Returns whether a redraw was pending and resets the flag
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }
}

impl EventHandler for RedrawFlag {
    fn handle_event(&mut self, event: &SketchEvent) {
        if event.needs_redraw() {
            self.mark();
        }
    }
}
