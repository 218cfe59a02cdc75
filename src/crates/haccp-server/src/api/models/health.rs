//! Health check response models

use serde::{Deserialize, Serialize};

/// Service liveness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness plus database state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    pub database: DatabaseHealth,
}

/// Database reachability and pool usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub open_connections: u32,
    pub idle_connections: u32,
}
