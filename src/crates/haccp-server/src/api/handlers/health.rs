//! Health check endpoint handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::api::{
    models::{DatabaseHealth, DetailedHealthResponse, HealthResponse},
    response,
    routes::AppState,
};
use crate::version::{PKG_NAME, VERSION};

/// Handler for GET /health
///
/// Returns basic health status without database check.
pub async fn health() -> impl IntoResponse {
    response::ok(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

/// Handler for GET /api/v1/system/health
///
/// Includes database connectivity; answers 503 when the database is unreachable.
pub async fn health_detailed(State(app_state): State<AppState>) -> (StatusCode, Json<DetailedHealthResponse>) {
    let stats = app_state.db.get_pool_statistics();
    let connected = match app_state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            false
        }
    };

    let body = DetailedHealthResponse {
        status: if connected { "ok" } else { "error" }.to_string(),
        name: PKG_NAME.to_string(),
        version: VERSION.to_string(),
        database: DatabaseHealth {
            connected,
            open_connections: stats.open_connections,
            idle_connections: stats.idle_connections,
        },
    };

    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
