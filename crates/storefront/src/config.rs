//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use dessert_devs_core::{Branch, BranchId};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
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

        let database_url = require("STOREFRONT_DATABASE_URL")?;

        let host = optional("STOREFRONT_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_owned(), e.to_string()))?;

        let port = optional("STOREFRONT_PORT")
            .unwrap_or_else(|| "3000".to_owned())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_owned(), e.to_string()))?;

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// The fixed pickup branch list.
///
/// Static configuration: three locations inside the Cairo metro area, the
/// same set the mobile app ships with. All nearest-branch math assumes this
/// single-metro spread.
#[must_use]
pub fn pickup_branches() -> Vec<Branch> {
    vec![
        Branch {
            id: BranchId::new("1"),
            title: "Deliver to : Home".to_owned(),
            detail: "Zamalek, Cairo".to_owned(),
            lat: 30.0508,
            lon: 31.2336,
        },
        Branch {
            id: BranchId::new("2"),
            title: "Office".to_owned(),
            detail: "Nasr City, Cairo".to_owned(),
            lat: 30.0561,
            lon: 31.3300,
        },
        Branch {
            id: BranchId::new("3"),
            title: "On the go".to_owned(),
            detail: "Drive-thru, Maadi".to_owned(),
            lat: 29.9626,
            lon: 31.2591,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_list_is_never_empty() {
        // closest_branch treats an empty list as a precondition violation,
        // so the static configuration must always have entries.
        assert!(!pickup_branches().is_empty());
    }
}
