//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Keys are
//! nested with `__`, so `PROVIDER__API_KEY` sets [`ProviderConfig::api_key`].

use serde::Deserialize;

/// Server configuration composed from section configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Identity-provider API configuration.
    pub provider: ProviderConfig,

    /// Session cookie configuration.
    #[serde(default)]
    pub cookie: CookieConfig,
}

/// Identity-provider API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider API, without a trailing slash.
    pub base_url: String,

    /// Project API key sent with every provider request.
    pub api_key: String,

    /// Per-request timeout for provider calls, in seconds.
    #[serde(default = "default_provider_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Lifetime of durable ("remember me") session cookies, in days.
    /// Session-scoped cookies carry no lifetime at all.
    #[serde(default = "default_durable_days")]
    pub durable_days: i64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_provider_timeout_seconds() -> u64 {
    10
}

fn default_durable_days() -> i64 {
    30
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            durable_days: default_durable_days(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_config_has_correct_defaults() {
        let config = CookieConfig::default();
        assert_eq!(config.durable_days, 30);
        assert!(config.secure_cookies);
    }

    #[test]
    fn provider_timeout_defaults_when_absent() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{"base_url": "https://identity.example.com", "api_key": "k"}"#,
        )
        .expect("should deserialize");
        assert_eq!(config.timeout_seconds, 10);
    }
}
