//! Environment-driven application configuration.

use crate::error::config::ConfigError;

/// Runtime configuration loaded from the process environment.
pub struct Config {
    /// Postgres connection string.
    pub database_url: String,
    /// Valkey/Redis connection string for the session store.
    pub valkey_url: String,
    /// Base URL of the payment gateway API.
    pub gateway_url: String,
    /// API key sent to the payment gateway.
    pub gateway_api_key: String,
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
}

impl Config {
    /// Reads configuration from the environment, failing on the first
    /// missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: Self::var("DATABASE_URL")?,
            valkey_url: Self::var("VALKEY_URL")?,
            gateway_url: Self::var("GATEWAY_URL")?,
            gateway_api_key: Self::var("GATEWAY_API_KEY")?,
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    fn var(name: &'static str) -> Result<String, ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
    }
}
