use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::event::{EventHandler, SketchEvent};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Broadcasts sketch events to registered handlers.
///
/// Dispatch is synchronous and runs handlers in subscription order. Handlers may re-enter
/// the bus: events they emit are queued and delivered once the current event has reached
/// every handler, and handlers they subscribe start receiving from the next event on.
pub struct EventBus {
    handlers: RefCell<Vec<(SubscriptionId, Box<dyn EventHandler>)>>,
    pending: RefCell<VecDeque<SketchEvent>>,
    /// Unsubscribed while their handler list was checked out for dispatch
    removed: RefCell<Vec<SubscriptionId>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            removed: RefCell::new(Vec::new()),
            dispatching: Cell::new(false),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Removes a handler. Outside of a dispatch, returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        if handlers.len() != before {
            return true;
        }
        if self.dispatching.get() {
            // The handler list is checked out; drop it when dispatch hands it back.
            self.removed.borrow_mut().push(id);
            return true;
        }
        false
    }

    pub fn emit(&self, event: SketchEvent) {
        self.pending.borrow_mut().push_back(event);
        if self.dispatching.replace(true) {
            return;
        }

        let mut handlers = std::mem::take(&mut *self.handlers.borrow_mut());
        while let Some(event) = self.next_pending() {
            for (_, handler) in handlers.iter_mut() {
                handler.handle_event(&event);
            }
        }

        // Anything subscribed during dispatch goes after the existing handlers.
        let mut current = self.handlers.borrow_mut();
        handlers.append(&mut current);
        let removed = std::mem::take(&mut *self.removed.borrow_mut());
        handlers.retain(|(id, _)| !removed.contains(id));
        *current = handlers;
        self.dispatching.set(false);
    }

    fn next_pending(&self) -> Option<SketchEvent> {
        self.pending.borrow_mut().pop_front()
    }
}
