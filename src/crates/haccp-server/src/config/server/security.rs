//! Cron secret middleware
//!
//! The generation endpoints are called by an external scheduler with
//! `Authorization: Bearer <cron secret>` instead of a user token.

use crate::api::error::ApiError;
use crate::config::CronConfig;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::warn;

/// Cron middleware state
#[derive(Debug, Clone)]
pub struct CronSecurity {
    config: Arc<CronConfig>,
}

impl CronSecurity {
    pub fn new(config: CronConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Whether cron routes are callable at all
    pub fn enabled(&self) -> bool {
        self.secret().is_some()
    }

    pub fn secret(&self) -> Option<&str> {
        self.config.secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Check a presented bearer token against the configured secret
    pub fn accepts(&self, presented: &str) -> bool {
        match self.secret() {
            Some(expected) => constant_time_eq(presented.as_bytes(), expected.as_bytes()),
            None => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Require the cron secret as bearer token
pub async fn cron_auth(
    State(state): State<Arc<CronSecurity>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.enabled() {
        warn!("Cron request refused - no cron secret configured");
        return ApiError::Forbidden("Cron endpoints are disabled".to_string()).into_response();
    }

    let presented = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if state.accepts(token) => next.run(request).await,
        _ => {
            warn!("Unauthorized cron request - missing or invalid secret");
            ApiError::Unauthorized("Invalid cron secret".to_string()).into_response()
        }
    }
}
