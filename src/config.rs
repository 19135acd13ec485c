//! Configuration management for the coursebook server

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_pool_min_size")]
    pub pool_min_size: u32,
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
    #[serde(default = "default_pool_timeout")]
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit log lines as JSON instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from defaults, an optional `config` file, and
    /// `COURSEBOOK__`-prefixed environment variables.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("database.url", default_database_url())?
            .set_default("database.pool_min_size", default_pool_min_size())?
            .set_default("database.pool_max_size", default_pool_max_size())?
            .set_default("database.pool_timeout_seconds", default_pool_timeout())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            // Optional config file (config.yaml, config.toml, ...)
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables.
            // Double underscore maps to nested keys:
            // COURSEBOOK__SERVER__PORT=8080 -> config.server.port
            .add_source(
                config::Environment::with_prefix("COURSEBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;

        // Convenience escape hatch: allow DATABASE_URL to set `database.url`
        // when no explicit COURSEBOOK__DATABASE__URL override is present.
        if std::env::var("COURSEBOOK__DATABASE__URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.pool_max_size == 0 {
            return Err("database.pool_max_size must be at least 1".to_string());
        }
        if self.database.pool_min_size > self.database.pool_max_size {
            return Err(format!(
                "database.pool_min_size ({}) must not exceed database.pool_max_size ({})",
                self.database.pool_min_size, self.database.pool_max_size
            ));
        }
        if self.server.cors_origins.is_empty() {
            return Err("server.cors_origins must not be empty (use \"*\" to allow any)".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address '{addr}': {e}"))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_database_url() -> String {
    "sqlite:coursebook.db".to_string()
}

fn default_pool_min_size() -> u32 {
    1
}

fn default_pool_max_size() -> u32 {
    5
}

fn default_pool_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
