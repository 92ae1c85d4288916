mod bus;
mod events;
mod handlers;

pub use bus::{EventBus, SubscriptionId};
pub use events::SketchEvent;
pub use handlers::RedrawFlag;

pub trait EventHandler {
    fn handle_event(&mut self, event: &SketchEvent);
}
