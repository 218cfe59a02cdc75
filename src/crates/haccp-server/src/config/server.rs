//! Server configuration for haccp-server
//!
//! Loads and parses the haccp-server.toml configuration file with server,
//! database, auth, cron and logbook settings. Every section is optional and
//! falls back to defaults.

use haccp_core::{parse_slot, DEFAULT_BACKFILL_DAYS, DEFAULT_SLOTS, DEFAULT_WARN_DAYS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod security;

/// Shortest accepted JWT signing secret
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ServerConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Server identification and listen address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfoConfig {
    /// Server name for identification
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerInfoConfig {
    fn default() -> Self {
        Self {
            name: "haccp-server".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file path
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "haccp.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Token and password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret (can be overridden by JWT_SECRET)
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 86_400,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Shared secret for the externally triggered generation endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CronConfig {
    /// Bearer secret (can be overridden by CRON_SECRET); cron routes are refused without one
    pub secret: Option<String>,
}

/// Diary defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    /// Days of readings created when a device is registered
    pub backfill_days: u32,
    /// Daily reading times (HH:MM)
    pub slots: Vec<String>,
    /// Days before expiry at which a health book is flagged
    pub health_book_warn_days: i64,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            backfill_days: DEFAULT_BACKFILL_DAYS,
            slots: DEFAULT_SLOTS.iter().map(|s| s.to_string()).collect(),
            health_book_warn_days: DEFAULT_WARN_DAYS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerInfoConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cron: CronConfig,
    pub logbook: LogbookConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ServerConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ServerConfigError::ReadError)?;
        Self::from_str(&content)
    }

    /// Load configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ServerConfigError> {
        toml::from_str(content).map_err(ServerConfigError::ParseError)
    }

    /// Load configuration from the default locations, then apply environment overrides
    ///
    /// Searches for config in:
    /// 1. CONFIG_PATH environment variable
    /// 2. ./config/haccp-server.toml
    /// 3. ./haccp-server.toml
    ///
    /// Without a file the defaults are used.
    pub fn load() -> Result<Self, ServerConfigError> {
        let mut config = if let Ok(config_path) = std::env::var("CONFIG_PATH") {
            Self::from_file(config_path)?
        } else {
            let paths = [
                PathBuf::from("config/haccp-server.toml"),
                PathBuf::from("./haccp-server.toml"),
            ];
            match paths.iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => {
                    tracing::warn!("No haccp-server.toml found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply HOST, PORT, DATABASE_PATH, JWT_SECRET and CRON_SECRET from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ServerConfigError::InvalidConfig(format!("PORT is not a valid port: {port}")))?;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(secret) = lookup("CRON_SECRET") {
            self.cron.secret = Some(secret);
        }
        Ok(())
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ServerConfigError> {
        if self.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ServerConfigError::InvalidConfig(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} characters"
            )));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "auth.token_ttl_secs must be greater than 0".to_string(),
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ServerConfigError::InvalidConfig(
                "auth.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if self.logbook.backfill_days == 0 {
            return Err(ServerConfigError::InvalidConfig(
                "logbook.backfill_days must be greater than 0".to_string(),
            ));
        }
        if self.logbook.slots.is_empty() {
            return Err(ServerConfigError::InvalidConfig(
                "logbook.slots must list at least one HH:MM time".to_string(),
            ));
        }
        for slot in &self.logbook.slots {
            parse_slot(slot).map_err(|e| ServerConfigError::InvalidConfig(format!("logbook.slots: {e}")))?;
        }
        if self.logbook.health_book_warn_days < 0 {
            return Err(ServerConfigError::InvalidConfig(
                "logbook.health_book_warn_days cannot be negative".to_string(),
            ));
        }
        if matches!(self.cron.secret.as_deref(), Some("")) {
            return Err(ServerConfigError::InvalidConfig(
                "cron.secret cannot be empty; omit it to disable cron routes".to_string(),
            ));
        }
        Ok(())
    }

    /// Get database URL from configuration
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database.path)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
