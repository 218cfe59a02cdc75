//! Configuration module for the logbook server
//!
//! Loads `haccp-server.toml` (server address, database, auth, cron secret
//! and logbook defaults) and applies environment overrides.

pub mod server;

pub use server::security::{cron_auth, CronSecurity};
pub use server::{
    AuthConfig, CronConfig, DatabaseConfig, LogbookConfig, ServerConfig, ServerConfigError,
    ServerInfoConfig,
};
