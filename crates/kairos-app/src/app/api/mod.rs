mod calendar;
mod events;
mod health;
pub mod response;

use salvo::Router;

// Re-export route constants from core
pub use kairos_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CALENDAR_ROUTE_COMPONENT, CALENDAR_ROUTE_PREFIX,
    EVENTS_ROUTE_COMPONENT, EVENTS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router with the health, event and calendar handlers.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(health::routes())
        .push(events::routes())
        .push(calendar::routes())
}
