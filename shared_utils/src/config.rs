use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use crate::env;

/// Environment variable holding the warehouse password. Credentials never
/// live in the TOML file.
pub const PASSWORD_ENV_VAR: &str = "WAREHOUSE_PASSWORD";

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable required by the application is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`WarehouseConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Connection settings for the statistics warehouse.
///
/// Loaded from a TOML file; the password comes from
/// [`PASSWORD_ENV_VAR`] via [`WarehouseConfig::password`].
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Account identifier, e.g. `"myorg-prod"`.
    pub account: String,
    /// Login name.
    pub user: String,
    /// Database holding the labor-statistics share.
    pub database: String,
    /// Schema within the database.
    pub schema: String,
    /// Optional role to assume after connecting.
    #[serde(default)]
    pub role: Option<String>,
}

impl WarehouseConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// The warehouse password, read from the environment on every call.
    pub fn password(&self) -> Result<SecretString, ConfigError> {
        env::get_secret_env_var(PASSWORD_ENV_VAR)
            .map_err(|e| ConfigError::MissingEnvVar(e.0))
    }
}
