use std::fmt;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u8,
    pub run_migrations: bool,
}

/// The URL usually carries credentials, so only its presence is printed.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Occurrence expansion settings for the calendar view.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Open-ended recurrences run until 31 December of the current year plus this many years.
    pub horizon_years: u16,
    /// Upper bound on the occurrences generated from a single definition.
    pub max_occurrences: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

pub const DEFAULT_HORIZON_YEARS: u16 = 2;
pub const DEFAULT_MAX_OCCURRENCES: usize = 10_000;

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `config.toml` and environment variables.
    /// Environment variables (`KAIROS__SECTION__KEY`) take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8699)?
            .set_default("database.max_connections", 4)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.backend", "postgres")?
            .set_default("logging.level", "debug")?
            .set_default("calendar.horizon_years", i64::from(DEFAULT_HORIZON_YEARS))?
            .set_default("calendar.max_occurrences", 10_000)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("KAIROS")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Returns the database URL required by the `PostgreSQL` backend.
    ///
    /// ## Errors
    /// Returns an error if no URL is configured.
    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("database.url must be set for the postgres backend"))
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
