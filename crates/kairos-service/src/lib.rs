//! Kairos calendar service - event store backends and recurrence expansion.

pub mod calendar;
pub mod error;
pub mod event;
