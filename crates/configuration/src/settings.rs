use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    #[serde(default)]
    pub auth: Auth,
    pub logging: Logging,
}

impl Config {
    /// Checks the values that deserialization alone cannot enforce.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must be set (or DATABASE_URL)".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        self.server.socket_addr()?;

        // An empty key counts as unset.
        if self.auth.scraper_key.as_deref().is_some_and(str::is_empty) {
            self.auth.scraper_key = None;
        }
        Ok(self)
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Contains parameters for the PostgreSQL connection pool.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    /// A `postgres://` connection string.
    #[serde(default)]
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Database {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Credentials of the scraper, the only client allowed to write quotes.
#[derive(Clone, Default, Deserialize)]
pub struct Auth {
    /// Expected value of the `SCRAPER-KEY` header. When unset, every write is rejected.
    #[serde(default)]
    pub scraper_key: Option<String>,
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("scraper_key", &self.scraper_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive (e.g. "info" or "web_server=debug,info").
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}
