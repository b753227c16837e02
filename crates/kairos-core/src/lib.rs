//! Kairos calendar service - shared domain types, configuration and errors.

pub mod config;
pub mod constants;
pub mod error;
pub mod timestamp;
pub mod types;
