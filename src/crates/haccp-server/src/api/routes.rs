//! API route definitions
//!
//! Defines all API routes and their associated handler functions.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{cors::cors_layer_restricted, cors_layer, logging_layer};
use crate::config::{cron_auth, CronSecurity, ServerConfig};
use crate::db::DatabaseConnection;
use crate::services::{AuthError, AuthService, JwtManager, LogbookSettings};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService>,
    pub cron: Arc<CronSecurity>,
    pub logbook: Arc<LogbookSettings>,
    pub cors_origins: Arc<Vec<String>>,
}

impl AppState {
    /// Assemble the state from a validated configuration
    pub fn new(db: DatabaseConnection, config: &ServerConfig) -> Result<Self, AuthError> {
        let jwt = JwtManager::new(&config.auth.jwt_secret, config.auth.token_ttl_secs)?;
        Ok(Self {
            db,
            auth: Arc::new(AuthService::new(jwt, config.auth.bcrypt_cost)),
            cron: Arc::new(CronSecurity::new(config.cron.clone())),
            logbook: Arc::new(LogbookSettings::from(&config.logbook)),
            cors_origins: Arc::new(config.server.cors_origins.clone()),
        })
    }

    fn cors(&self) -> CorsLayer {
        if self.cors_origins.is_empty() {
            cors_layer()
        } else {
            let origins: Vec<&str> = self.cors_origins.iter().map(String::as_str).collect();
            cors_layer_restricted(&origins)
        }
    }
}

/// Routes guarded by the cron secret instead of a user token
fn cron_routes(cron: Arc<CronSecurity>) -> Router<AppState> {
    Router::new()
        .route("/admin/cron/temperature-readings", post(handlers::cron::temperature_readings))
        .route("/admin/cron/temperature-logs", post(handlers::cron::temperature_logs))
        .route("/admin/cron/food-diary", post(handlers::cron::food_diary))
        .route_layer(from_fn_with_state(cron, cron_auth))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/system/health", get(handlers::health_detailed))
        // Accounts
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me))
        .route("/eik/:eik", get(handlers::check_eik))
        // Businesses and establishments
        .route(
            "/businesses",
            post(handlers::create_business).get(handlers::list_businesses),
        )
        .route(
            "/businesses/:id",
            get(handlers::get_business)
                .put(handlers::update_business)
                .delete(handlers::delete_business),
        )
        .route(
            "/establishments",
            post(handlers::create_establishment).get(handlers::list_establishments),
        )
        .route(
            "/establishments/:id",
            get(handlers::get_establishment)
                .put(handlers::update_establishment)
                .delete(handlers::delete_establishment),
        )
        // Personnel
        .route(
            "/personnel",
            post(handlers::create_personnel).get(handlers::list_personnel),
        )
        .route("/personnel/health-books", get(handlers::health_books))
        .route(
            "/personnel/:id",
            get(handlers::get_personnel)
                .put(handlers::update_personnel)
                .delete(handlers::delete_personnel),
        )
        // Temperature diaries
        .route(
            "/diary-devices",
            post(handlers::create_device).get(handlers::list_devices),
        )
        .route(
            "/diary-devices/:id",
            get(handlers::get_device)
                .put(handlers::update_device)
                .delete(handlers::delete_device),
        )
        .route(
            "/temperature-readings",
            post(handlers::create_reading).get(handlers::list_readings),
        )
        .route(
            "/temperature-readings/:id",
            get(handlers::get_reading).delete(handlers::delete_reading),
        )
        .route(
            "/temperature-logs",
            post(handlers::temperature_logs::create_log).get(handlers::temperature_logs::list_logs),
        )
        .route("/temperature-logs/generate", post(handlers::temperature_logs::generate_logs))
        .route(
            "/temperature-logs/:id",
            axum::routing::delete(handlers::temperature_logs::delete_log),
        )
        // Incoming controls
        .route(
            "/incoming-controls",
            post(handlers::create_control).get(handlers::list_controls),
        )
        .route(
            "/incoming-controls/:id",
            get(handlers::get_control)
                .put(handlers::update_control)
                .delete(handlers::delete_control),
        )
        // Cleaning
        .route(
            "/cleaning-templates",
            post(handlers::cleaning::create_template).get(handlers::cleaning::list_templates),
        )
        .route(
            "/cleaning-templates/:id",
            put(handlers::cleaning::update_template).delete(handlers::cleaning::delete_template),
        )
        .route(
            "/cleaning-logs",
            post(handlers::cleaning::create_log).get(handlers::cleaning::list_logs),
        )
        .route(
            "/cleaning-logs/:id",
            axum::routing::delete(handlers::cleaning::delete_log),
        )
        // Food
        .route(
            "/food-items",
            post(handlers::food::create_item).get(handlers::food::list_items),
        )
        .route(
            "/food-items/:id",
            get(handlers::food::get_item)
                .put(handlers::food::update_item)
                .delete(handlers::food::delete_item),
        )
        .route(
            "/food-diary",
            post(handlers::food::create_entry).get(handlers::food::list_entries),
        )
        .route(
            "/food-diary/:id",
            axum::routing::delete(handlers::food::delete_entry),
        )
        // Administration
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/:id", put(handlers::admin::update_user))
        .route("/admin/stats", get(handlers::admin::stats))
}

/// Build the complete API router
pub fn create_router(state: AppState) -> Router {
    let cors = state.cors();

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes().merge(cron_routes(state.cron.clone())))
        .layer(cors)
        .layer(logging_layer())
        .with_state(state)
}
