//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ODOO_URL` - Base URL of the Odoo backend (e.g., <https://demo.odoo.com>)
//! - `ODOO_DB` - Backend database name
//! - `ODOO_USERNAME` - Backend login
//! - `ODOO_PASSWORD` - Backend password
//!
//! ## Optional
//! - `GATEWAY_HOST` - Bind address (default: 127.0.0.1)
//! - `GATEWAY_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway application configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Odoo backend configuration
    pub odoo: OdooConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Odoo backend connection configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct OdooConfig {
    /// Base URL of the backend (no trailing slash)
    pub url: String,
    /// Database name
    pub db: String,
    /// Login username
    pub username: String,
    /// Login password
    pub password: SecretString,
}

impl std::fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GATEWAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GATEWAY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("GATEWAY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("GATEWAY_PORT".to_string(), e.to_string()))?;

        let odoo = OdooConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            odoo,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Odoo backend configuration.
    #[must_use]
    pub const fn odoo(&self) -> &OdooConfig {
        &self.odoo
    }
}

impl OdooConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut url = get_required_env("ODOO_URL")?;
        // Normalize: the RPC path is appended by the client
        while url.ends_with('/') {
            url.pop();
        }

        Ok(Self {
            url,
            db: get_required_env("ODOO_DB")?,
            username: get_required_env("ODOO_USERNAME")?,
            password: SecretString::from(get_required_env("ODOO_PASSWORD")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            odoo: OdooConfig {
                url: "http://localhost:8069".to_string(),
                db: "test".to_string(),
                username: "admin".to_string(),
                password: SecretString::from("secret"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        };

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_odoo_config_debug_redacts_password() {
        let config = OdooConfig {
            url: "http://localhost:8069".to_string(),
            db: "test".to_string(),
            username: "admin".to_string(),
            password: SecretString::from("hunter2"),
        };

        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
