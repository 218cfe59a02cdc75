//! Daily generation endpoints for an external scheduler
//!
//! Mounted behind the cron secret middleware. Each run is idempotent and
//! reports how many rows it created and skipped.

use axum::{extract::State, response::IntoResponse};
use chrono::NaiveDate;

use crate::api::{
    error::ApiResult,
    extract::ApiQuery,
    middleware::validate_date,
    models::CronQuery,
    response,
    routes::AppState,
};
use crate::services::{today, LogbookService};

fn run_date(query: &CronQuery) -> ApiResult<NaiveDate> {
    match query.date.as_deref() {
        Some(date) => validate_date(date, "date"),
        None => Ok(today()),
    }
}

/// POST /api/v1/admin/cron/temperature-readings?date=
pub async fn temperature_readings(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<CronQuery>,
) -> ApiResult<impl IntoResponse> {
    let date = run_date(&query)?;
    let summary =
        LogbookService::generate_device_readings(app_state.db.pool(), date, &app_state.logbook.slots).await?;
    Ok(response::ok(summary))
}

/// POST /api/v1/admin/cron/temperature-logs?date=
pub async fn temperature_logs(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<CronQuery>,
) -> ApiResult<impl IntoResponse> {
    let date = run_date(&query)?;
    let summary =
        LogbookService::generate_temperature_logs(app_state.db.pool(), None, date, &app_state.logbook.slots)
            .await?;
    Ok(response::ok(summary))
}

/// POST /api/v1/admin/cron/food-diary?date=
pub async fn food_diary(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<CronQuery>,
) -> ApiResult<impl IntoResponse> {
    let date = run_date(&query)?;
    let summary =
        LogbookService::generate_food_diary(app_state.db.pool(), date, &app_state.logbook.slots).await?;
    Ok(response::ok(summary))
}
