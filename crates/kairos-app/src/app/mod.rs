pub mod api;

use std::sync::Arc;

use salvo::Router;
use salvo::logging::Logger;

use kairos_core::config::Settings;
use kairos_service::event::EventStore;

use crate::config::ConfigHandler;
use crate::store_handler::EventStoreHandler;

/// ## Summary
/// Assembles the full router: request logging, depot providers and API routes.
#[must_use]
pub fn router(store: Arc<dyn EventStore>, settings: Settings) -> Router {
    Router::new()
        .hoop(Logger::new())
        .hoop(EventStoreHandler { store })
        .hoop(ConfigHandler { settings })
        .push(api::routes())
}
