//! Kairos calendar service - `PostgreSQL` persistence for event definitions.

pub mod db;
pub mod error;
pub mod model;
