use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `TODO_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TODO";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// SQLite URL: `sqlite://<path>` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Maximum connection lifetime in seconds; 0 keeps connections forever
    pub max_lifetime_secs: u64,
    /// How long to wait for a pooled connection, in seconds
    pub acquire_timeout_secs: u64,
    /// Time budget for a single store call, in milliseconds
    pub query_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
    /// Upper bound for a single request, in seconds
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain on shutdown, in seconds
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration with an optional explicit config file
    ///
    /// Sources, lowest precedence first: embedded defaults, the config file,
    /// `TODO_`-prefixed variables, then `DATABASE_URL`, `LISTEN_ADDR` and
    /// `LOG_LEVEL`.
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(config_file) = config_file {
            builder = builder.add_source(File::with_name(config_file).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Self::apply_standard_env_vars(&mut result);

        Ok(result)
    }

    /// Apply standard environment variables (DATABASE_URL, LISTEN_ADDR, LOG_LEVEL)
    fn apply_standard_env_vars(config: &mut Config) {
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database.url = database_url;
        }

        if let Ok(listen_addr) = env::var("LISTEN_ADDR") {
            config.server.listen_addr = listen_addr;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.database.query_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        let database_url = self.database_url();
        if !(database_url.starts_with("sqlite://") || database_url == "sqlite::memory:") {
            return Err(anyhow::anyhow!(
                "Only SQLite databases are supported. URL must start with 'sqlite://' or be 'sqlite::memory:'. Got: {}",
                database_url
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let address = self.server_address();
        address
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address: {address}"))?;

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(anyhow::anyhow!(
                "Database min_connections ({}) cannot exceed max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            ));
        }

        let timeouts = [
            ("database.acquire_timeout_secs", self.database.acquire_timeout_secs),
            ("database.query_timeout_ms", self.database.query_timeout_ms),
            ("server.request_timeout_secs", self.server.request_timeout_secs),
            ("server.shutdown_timeout_secs", self.server.shutdown_timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, value)| *value == 0) {
            return Err(anyhow::anyhow!("{name} must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://todo.sqlite".to_string(),
                max_connections: 5,
                min_connections: 1,
                max_lifetime_secs: 1800,
                acquire_timeout_secs: 5,
                query_timeout_ms: 1000,
            },
            server: ServerConfig {
                listen_addr: "127.0.0.1".to_string(),
                port: 8080,
                request_timeout_secs: 10,
                shutdown_timeout_secs: 5,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
