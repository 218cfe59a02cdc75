//! Temperature reading endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::{validate_date_window, validate_uuid},
    models::{CreateReadingRequest, Pagination, ReadingListQuery},
    response,
    routes::AppState,
};
use crate::db::repositories::TemperatureReadingRepository;

use super::diary_devices::load_device;

/// Record a manual reading
///
/// A reading already present for the same device, date and time is a conflict.
///
/// POST /api/v1/temperature-readings
pub async fn create_reading(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateReadingRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    let device = load_device(pool, &caller, &req.device_id).await?;

    let reading = req.into_reading();
    let created = TemperatureReadingRepository::create(pool, &reading).await?;

    if !device.range().contains(created.temperature) {
        tracing::warn!(
            "Reading {} on device {} is out of range: {}",
            created.id,
            device.id,
            created.temperature
        );
    }
    tracing::info!("Recorded reading {} for device {}", created.id, device.id);
    Ok(response::created(created))
}

/// GET /api/v1/temperature-readings?device_id=&from=&to=
pub async fn list_readings(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<ReadingListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let window = validate_date_window(query.from.as_deref(), query.to.as_deref())?;
    let pool = app_state.db.pool();

    let device_id = query.device_id.as_deref();
    if let Some(device_id) = device_id {
        load_device(pool, &caller, device_id).await?;
    }

    let readings =
        TemperatureReadingRepository::list(pool, caller.scope(), device_id, &window, paging.window()).await?;
    let total = TemperatureReadingRepository::count(pool, caller.scope(), device_id, &window).await?;

    Ok(response::paginated(readings, paging.page, paging.per_page, total))
}

/// GET /api/v1/temperature-readings/:id
pub async fn get_reading(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(TemperatureReadingRepository::owner_of(pool, &id).await?, "Reading", &id)?;

    let reading = TemperatureReadingRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Reading not found: {}", id)))?;

    Ok(response::ok(reading))
}

/// DELETE /api/v1/temperature-readings/:id
pub async fn delete_reading(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(TemperatureReadingRepository::owner_of(pool, &id).await?, "Reading", &id)?;

    TemperatureReadingRepository::delete(pool, &id).await?;

    tracing::info!("Deleted reading {}", id);
    Ok(response::no_content())
}
