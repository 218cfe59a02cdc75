//! EIK check handler

use axum::{extract::Path, response::IntoResponse};

use crate::api::{models::EikCheckResponse, response};

/// Check an identifier without storing anything
///
/// GET /api/v1/eik/:eik
pub async fn check_eik(Path(eik): Path<String>) -> impl IntoResponse {
    response::ok(EikCheckResponse::check(eik.trim()))
}
