//! Establishment CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::validate_uuid,
    models::{
        CreateEstablishmentRequest, EstablishmentListQuery, Pagination, UpdateEstablishmentRequest,
    },
    response,
    routes::AppState,
};
use crate::db::repositories::EstablishmentRepository;
use crate::db::DatabasePool;

use super::businesses::load_business;

/// Check the caller may record against an establishment
pub(crate) async fn ensure_establishment(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<()> {
    validate_uuid(id)?;
    let owner = EstablishmentRepository::owner_of(pool, id).await?;
    caller.authorize(owner, "Establishment", id)
}

/// POST /api/v1/establishments
pub async fn create_establishment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateEstablishmentRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    load_business(pool, &caller, &req.business_id).await?;

    let created = EstablishmentRepository::create(pool, &req.into_establishment()).await?;

    tracing::info!("Created establishment {} for business {}", created.id, created.business_id);
    Ok(response::created(created))
}

/// GET /api/v1/establishments?business_id=
pub async fn list_establishments(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<EstablishmentListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let business_id = query.business_id.as_deref();
    if let Some(business_id) = business_id {
        load_business(pool, &caller, business_id).await?;
    }

    let establishments =
        EstablishmentRepository::list(pool, caller.scope(), business_id, paging.window()).await?;
    let total = EstablishmentRepository::count(pool, caller.scope(), business_id).await?;

    Ok(response::paginated(establishments, paging.page, paging.per_page, total))
}

/// GET /api/v1/establishments/:id
pub async fn get_establishment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &id).await?;

    let establishment = EstablishmentRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Establishment not found: {}", id)))?;

    Ok(response::ok(establishment))
}

/// PUT /api/v1/establishments/:id
pub async fn update_establishment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateEstablishmentRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &id).await?;

    let mut establishment = EstablishmentRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Establishment not found: {}", id)))?;
    req.apply(&mut establishment)?;

    let updated = EstablishmentRepository::update(pool, &establishment).await?;

    tracing::info!("Updated establishment {}", updated.id);
    Ok(response::ok(updated))
}

/// DELETE /api/v1/establishments/:id
pub async fn delete_establishment(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &id).await?;

    if !EstablishmentRepository::delete(pool, &id).await? {
        return Err(ApiError::NotFound(format!("Establishment not found: {}", id)));
    }

    tracing::info!("Deleted establishment {}", id);
    Ok(response::no_content())
}
