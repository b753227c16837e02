use std::sync::Arc;

use salvo::Listener;
use salvo::conn::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use kairos_app::app::router;
use kairos_core::config::{Settings, StorageBackend, load_config};
use kairos_db::db::connection::create_pool;
use kairos_db::db::migrate::run_pending_migrations;
use kairos_service::event::{EventStore, MemoryEventStore, PgEventStore};

/// ## Summary
/// Builds the event store selected by `storage.backend`.
///
/// ## Errors
/// Returns an error if the database URL is missing, migrations fail or the pool cannot be created.
async fn build_store(config: &Settings) -> anyhow::Result<Arc<dyn EventStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory event store, data is lost on shutdown");
            Ok(Arc::new(MemoryEventStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config.database_url()?;

            if config.database.run_migrations {
                run_pending_migrations(url).await?;
                tracing::info!("Database migrations applied.");
            }

            let pool = create_pool(url, u32::from(config.database.max_connections)).await?;

            Ok(Arc::new(PgEventStore::new(Arc::new(pool))))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Kairos calendar server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = build_store(&config).await?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor)
        .serve(router(store, config))
        .await;

    Ok(())
}
