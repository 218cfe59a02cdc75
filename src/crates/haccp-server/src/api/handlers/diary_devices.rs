//! Diary device endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::validate_uuid,
    models::{CreateDeviceRequest, DeviceListQuery, DeviceResponse, Pagination, UpdateDeviceRequest},
    response,
    routes::AppState,
};
use crate::db::models::DiaryDevice;
use crate::db::repositories::DiaryDeviceRepository;
use crate::db::DatabasePool;
use crate::services::{today, LogbookService};

use super::establishments::ensure_establishment;

pub(crate) async fn load_device(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<DiaryDevice> {
    validate_uuid(id)?;
    let owner = DiaryDeviceRepository::owner_of(pool, id).await?;
    caller.authorize(owner, "Device", id)?;
    DiaryDeviceRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Device not found: {}", id)))
}

/// Register a device and backfill its diary
///
/// POST /api/v1/diary-devices
pub async fn create_device(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateDeviceRequest>,
) -> ApiResult<impl IntoResponse> {
    let range = req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let device = req.into_device(range);
    let (device, readings_created) =
        LogbookService::register_device(pool, &device, &app_state.logbook, today()).await?;

    Ok(response::created(DeviceResponse { device, readings_created }))
}

/// GET /api/v1/diary-devices?establishment_id=
pub async fn list_devices(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<DeviceListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let devices = DiaryDeviceRepository::list(pool, caller.scope(), establishment_id, paging.window()).await?;
    let total = DiaryDeviceRepository::count(pool, caller.scope(), establishment_id).await?;

    Ok(response::paginated(devices, paging.page, paging.per_page, total))
}

/// GET /api/v1/diary-devices/:id
pub async fn get_device(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let device = load_device(app_state.db.pool(), &caller, &id).await?;
    Ok(response::ok(device))
}

/// PUT /api/v1/diary-devices/:id
pub async fn update_device(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateDeviceRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    let mut device = load_device(pool, &caller, &id).await?;
    req.apply(&mut device)?;

    let updated = DiaryDeviceRepository::update(pool, &device).await?;

    tracing::info!("Updated device {}", updated.id);
    Ok(response::ok(updated))
}

/// Delete a device together with its readings
///
/// DELETE /api/v1/diary-devices/:id
pub async fn delete_device(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_device(pool, &caller, &id).await?;
    DiaryDeviceRepository::delete(pool, &id).await?;

    tracing::info!("Deleted device {}", id);
    Ok(response::no_content())
}
