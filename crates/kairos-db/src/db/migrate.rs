//! Embedded schema migrations.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies all pending migrations on a dedicated connection.
///
/// Migrations run synchronously, so the work happens on a blocking thread.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_pending_migrations(database_url: &str) -> anyhow::Result<()> {
    let url = database_url.to_owned();

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;

        for version in &applied {
            tracing::info!(version = %version, "Applied migration");
        }
        tracing::debug!(count = applied.len(), "Migrations up to date");
        Ok(())
    })
    .await?
}
