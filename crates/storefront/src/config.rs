//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STORE` - Store backend, `memory` or `remote`
//!   (default: memory)
//! - `STOREFRONT_STORE_URL` - Document store base URL (required when
//!   `STOREFRONT_STORE=remote`)
//! - `STOREFRONT_STORE_TOKEN` - Document store auth token
//! - `STOREFRONT_SEED` - Seed sample data when the catalog is empty
//!   (default: true for memory, false for remote)
//! - `STOREFRONT_DEFAULT_USER_ID` - Development fallback identity for
//!   cart requests without an `x-user-id` header
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use clementine_core::UserId;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which store backend serves this process.
#[derive(Clone)]
pub enum StoreBackendConfig {
    /// In-memory maps; state lives and dies with the process.
    Memory,
    /// Networked document database.
    Remote {
        /// Base URL of the document store.
        base_url: String,
        /// Auth token appended to each request, if the store requires one.
        auth_token: Option<SecretString>,
    },
}

impl std::fmt::Debug for StoreBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.debug_struct("Memory").finish(),
            Self::Remote { base_url, auth_token } => f
                .debug_struct("Remote")
                .field("base_url", base_url)
                .field(
                    "auth_token",
                    &auth_token.as_ref().map(|_| "[REDACTED]"),
                )
                .finish(),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store backend selection
    pub store: StoreBackendConfig,
    /// Seed sample data into an empty store on startup
    pub seed_on_start: bool,
    /// Development fallback identity for cart requests
    pub default_user_id: Option<UserId>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse, or if
    /// `STOREFRONT_STORE=remote` without a `STOREFRONT_STORE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or("STOREFRONT_HOST", &get, IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or("STOREFRONT_PORT", &get, 3000)?;

        let store = match get("STOREFRONT_STORE").as_deref().unwrap_or("memory") {
            "memory" => StoreBackendConfig::Memory,
            "remote" => StoreBackendConfig::Remote {
                base_url: get("STOREFRONT_STORE_URL").ok_or_else(|| {
                    ConfigError::MissingEnvVar("STOREFRONT_STORE_URL".to_owned())
                })?,
                auth_token: get("STOREFRONT_STORE_TOKEN").map(SecretString::from),
            },
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STOREFRONT_STORE".to_owned(),
                    format!("expected 'memory' or 'remote', got '{other}'"),
                ));
            }
        };

        let seed_default = matches!(store, StoreBackendConfig::Memory);
        let seed_on_start = parse_or("STOREFRONT_SEED", &get, seed_default)?;

        let default_user_id = get("STOREFRONT_DEFAULT_USER_ID")
            .map(|raw| {
                raw.parse::<UserId>().map_err(|e| {
                    ConfigError::InvalidEnvVar("STOREFRONT_DEFAULT_USER_ID".to_owned(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            store,
            seed_on_start,
            default_user_id,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or("SENTRY_SAMPLE_RATE", &get, 1.0)?,
            sentry_traces_sample_rate: parse_or("SENTRY_TRACES_SAMPLE_RATE", &get, 0.0)?,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse an optional variable, falling back to a default when unset.
fn parse_or<T: FromStr>(
    name: &str,
    get: impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match get(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
        None => Ok(default),
    }
}
