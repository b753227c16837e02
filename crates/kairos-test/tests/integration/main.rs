//! HTTP integration tests for the Kairos API, run against the in-memory store,
//! plus `PostgreSQL` store tests when `TEST_DATABASE_URL` is set.

mod calendar;
mod health;
mod pg_store;
