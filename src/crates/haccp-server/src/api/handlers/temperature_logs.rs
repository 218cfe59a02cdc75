//! Business temperature log endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::{validate_date, validate_date_window, validate_uuid},
    models::{CreateTemperatureLogRequest, GenerateLogsRequest, Pagination, TemperatureLogListQuery},
    response,
    routes::AppState,
};
use crate::db::repositories::{EstablishmentRepository, TemperatureLogRepository};
use crate::services::{today, LogbookService};

use super::businesses::load_business;

/// POST /api/v1/temperature-logs
pub async fn create_log(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateTemperatureLogRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    load_business(pool, &caller, &req.business_id).await?;

    if let Some(establishment_id) = &req.establishment_id {
        let establishment = EstablishmentRepository::get_by_id(pool, establishment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Establishment not found: {}", establishment_id)))?;
        if establishment.business_id != req.business_id {
            return Err(ApiError::ValidationError(
                "establishment_id belongs to another business".to_string(),
            ));
        }
    }

    let created = TemperatureLogRepository::create(pool, &req.into_log()).await?;

    tracing::info!("Recorded temperature log {} for business {}", created.id, created.business_id);
    Ok(response::created(created))
}

/// GET /api/v1/temperature-logs?business_id=&from=&to=
pub async fn list_logs(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<TemperatureLogListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let window = validate_date_window(query.from.as_deref(), query.to.as_deref())?;
    let pool = app_state.db.pool();

    let business_id = query.business_id.as_deref();
    if let Some(business_id) = business_id {
        load_business(pool, &caller, business_id).await?;
    }

    let logs = TemperatureLogRepository::list(pool, caller.scope(), business_id, &window, paging.window()).await?;
    let total = TemperatureLogRepository::count(pool, caller.scope(), business_id, &window).await?;

    Ok(response::paginated(logs, paging.page, paging.per_page, total))
}

/// DELETE /api/v1/temperature-logs/:id
pub async fn delete_log(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(TemperatureLogRepository::owner_of(pool, &id).await?, "Temperature log", &id)?;

    TemperatureLogRepository::delete(pool, &id).await?;

    tracing::info!("Deleted temperature log {}", id);
    Ok(response::no_content())
}

/// Fill one business's log for a day from the equipment it already logs
///
/// POST /api/v1/temperature-logs/generate
pub async fn generate_logs(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<GenerateLogsRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_business(pool, &caller, &req.business_id).await?;

    let date = match req.date.as_deref() {
        Some(date) => validate_date(date, "date")?,
        None => today(),
    };

    let summary = LogbookService::generate_temperature_logs(
        pool,
        Some(&req.business_id),
        date,
        &app_state.logbook.slots,
    )
    .await?;

    Ok(response::ok(summary))
}
