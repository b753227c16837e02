//! Query composition, one module per table.

pub mod event;
