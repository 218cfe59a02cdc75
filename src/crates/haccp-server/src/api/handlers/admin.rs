//! Administrator endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AdminUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::validate_uuid,
    models::{Pagination, StatsResponse, UpdateUserAccessRequest, UserListQuery},
    response,
    routes::AppState,
};
use crate::db::repositories::{
    BusinessRepository, CleaningRepository, DateWindow, DiaryDeviceRepository, EstablishmentRepository,
    FoodDiaryRepository, IncomingControlRepository, PersonnelRepository, TemperatureLogRepository,
    TemperatureReadingRepository, UserRepository,
};

/// GET /api/v1/admin/users
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(query): ApiQuery<UserListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let users = UserRepository::list(pool, paging.window()).await?;
    let total = UserRepository::count(pool).await?;

    Ok(response::paginated(users, paging.page, paging.per_page, total))
}

/// Change an account's role or enable/disable it
///
/// PUT /api/v1/admin/users/:id
pub async fn update_user(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserAccessRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    req.validate()?;
    if id == admin.id() {
        return Err(ApiError::BadRequest("Administrators cannot change their own access".to_string()));
    }

    let pool = app_state.db.pool();
    let user = UserRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", id)))?;

    let role = req.role.unwrap_or(user.role);
    let is_active = req.is_active.unwrap_or(user.is_active);
    let updated = UserRepository::update_access(pool, &id, &role, is_active)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", id)))?;

    tracing::info!(
        "Admin {} set user {} to role {} (active: {})",
        admin.id(),
        updated.id,
        updated.role,
        updated.is_active
    );
    Ok(response::ok(updated))
}

/// GET /api/v1/admin/stats
pub async fn stats(State(app_state): State<AppState>, _admin: AdminUser) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();

    let stats = StatsResponse {
        users: UserRepository::count(pool).await?,
        businesses: BusinessRepository::count(pool, None).await?,
        establishments: EstablishmentRepository::count(pool, None, None).await?,
        personnel: PersonnelRepository::count(pool).await?,
        diary_devices: DiaryDeviceRepository::count_all(pool).await?,
        temperature_readings: TemperatureReadingRepository::count_all(pool).await?,
        temperature_logs: TemperatureLogRepository::count_all(pool).await?,
        incoming_controls: IncomingControlRepository::count(pool, None, None, &DateWindow::default()).await?,
        cleaning_templates: CleaningRepository::count_templates(pool, None, None).await?,
        cleaning_logs: CleaningRepository::count_all_logs(pool).await?,
        food_diary_entries: FoodDiaryRepository::count_all(pool).await?,
    };

    Ok(response::ok(stats))
}
