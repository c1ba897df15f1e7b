//! Configuration management for the Crop Management Portal
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP__ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use crop_shared::{
    validate_batch_size, BULK_INSERT_PRESETS, DEFAULT_BATCH_SIZE, DEFAULT_DISPLAY_LIMIT,
};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::services::crop::DEFAULT_MAX_BULK_RECORDS;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Bulk insert configuration
    pub bulk: BulkConfig,

    /// Table view configuration
    pub view: ViewConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL host
    pub host: String,

    /// PostgreSQL port
    pub port: u16,

    /// Login role
    pub user: String,

    /// Login password
    pub password: String,

    /// Target database name
    pub name: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Seconds to wait for a connection before reporting the store unreachable
    pub acquire_timeout_secs: u64,

    /// Create the crops table at startup if it is missing
    pub ensure_schema: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BulkConfig {
    /// Rows generated and committed per batch
    pub batch_size: u32,

    /// Largest accepted bulk insert request
    pub max_records: u64,

    /// Sizes offered by the entry form
    pub presets: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    /// Rows shown by the table view
    pub display_limit: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Output format of the fmt layer
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "crop_management")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 0)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("database.ensure_schema", true)?
            .set_default("bulk.batch_size", DEFAULT_BATCH_SIZE)?
            .set_default("bulk.max_records", DEFAULT_MAX_BULK_RECORDS)?
            .set_default("bulk.presets", BULK_INSERT_PRESETS.to_vec())?
            .set_default("view.display_limit", DEFAULT_DISPLAY_LIMIT)?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP__ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_batch_size(self.bulk.batch_size)
            .map_err(|msg| ConfigError::Message(format!("bulk.batch_size: {}", msg)))?;
        if self.bulk.max_records == 0 {
            return Err(ConfigError::Message(
                "bulk.max_records must be greater than 0".to_string(),
            ));
        }
        if self.view.display_limit == 0 {
            return Err(ConfigError::Message(
                "view.display_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Connection options for the target store
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            bulk: BulkConfig::default(),
            view: ViewConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "crop_management".to_string(),
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 5,
            ensure_schema: true,
        }
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_records: DEFAULT_MAX_BULK_RECORDS,
            presets: BULK_INSERT_PRESETS.to_vec(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}
