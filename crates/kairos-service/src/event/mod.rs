//! Event definitions: validation and storage backends.

mod input;
mod memory;
mod postgres;
mod store;

pub use input::{EventDraft, EventPayload};
pub use memory::MemoryEventStore;
pub use postgres::PgEventStore;
pub use store::{EventFilter, EventStore};
