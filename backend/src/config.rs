//! Configuration management for the TAP Grading Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with TAP_ prefix
//!
//! Service-account credentials are injected here explicitly; nothing reads
//! them from ambient global context.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Google service-account configuration
    pub google: GoogleConfig,

    /// Audit spreadsheet configuration
    pub sheets: SheetsConfig,

    /// Driver photo storage configuration
    pub drive: DriveConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    /// Path to the service-account key JSON file
    pub service_account_key_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet id, or a full sheet URL to parse the id from
    pub spreadsheet_id: String,

    /// Worksheet (tab) the audit rows are appended to
    pub worksheet: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DriveConfig {
    /// Drive folder the driver photos are uploaded into
    pub folder_id: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("TAP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("sheets.worksheet", "Sheet1")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TAP_ prefix)
            .add_source(
                Environment::with_prefix("TAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
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
