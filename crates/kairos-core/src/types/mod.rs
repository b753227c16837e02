//! Domain types shared by the store, the expansion engine and the HTTP layer.

mod event;
mod recurrence;

pub use event::{EventDefinition, Occurrence};
pub use recurrence::{DayCode, DaySet, Frequency};
