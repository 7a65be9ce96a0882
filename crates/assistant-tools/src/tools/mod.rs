//! Tool implementations.

mod create_event;
mod search_events;

pub use create_event::CreateEvent;
pub use search_events::{SearchEvents, NO_EVENTS_FOUND};
