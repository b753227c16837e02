//! Kairos calendar service - HTTP application.

pub mod app;
pub mod config;
pub mod error;
pub mod store_handler;
