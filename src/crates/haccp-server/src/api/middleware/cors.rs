//! CORS middleware configuration

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Permissive CORS for development and same-host deployments
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// CORS restricted to the listed origins
///
/// Unparseable origins are ignored; with none left this is equivalent to
/// denying cross-origin requests.
pub fn cors_layer_restricted(allowed_origins: &[&str]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(Any)
}
