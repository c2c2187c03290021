//! Server configuration
//!
//! Configuration is layered: serde defaults, then an optional TOML file
//! (`CARELENS_CONFIG` path), then environment variables with the `CARELENS`
//! prefix and `__` separator (e.g. `CARELENS__SERVER__PORT=8080`).

use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes.
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON log lines instead of human-readable output.
    pub json: bool,
    pub file: Option<FileLoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileLoggingConfig {
    pub directory: String,
    pub prefix: String,
    /// One of: daily, hourly, never.
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret used to validate admin session tokens.
    pub jwt_secret: String,
    /// Clock skew tolerance for token expiry, in seconds.
    pub token_leeway_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size when the request does not specify `limit`.
    pub default_limit: u32,
    /// Upper bound for the requested `limit`.
    pub max_limit: u32,
    /// Concurrent per-test offer fetches in the price aggregator.
    pub offer_fetch_concurrency: usize,
    /// Maximum autocomplete suggestions returned.
    pub autocomplete_limit: usize,
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/carelens".to_string(),
            pool_min_size: 1,
            pool_max_size: 10,
            pool_timeout_seconds: 30,
            run_migrations: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_leeway_seconds: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            offer_fetch_concurrency: 8,
            autocomplete_limit: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> anyhow::Result<Self> {
        // Best effort: a missing .env file is not an error.
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();

        if let Ok(path) = std::env::var("CARELENS_CONFIG") {
            builder = builder.add_source(config::File::with_name(&path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("CARELENS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Validate settings that would otherwise fail at an awkward time.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err("auth.jwt_secret must be set".to_string());
        }
        if self.search.default_limit == 0 || self.search.max_limit == 0 {
            return Err("search limits must be positive".to_string());
        }
        if self.search.default_limit > self.search.max_limit {
            return Err("search.default_limit exceeds search.max_limit".to_string());
        }
        if self.search.offer_fetch_concurrency == 0 {
            return Err("search.offer_fetch_concurrency must be positive".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("Could not resolve listen address {addr}"))
    }
}
