//! Business CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::validate_uuid,
    models::{BusinessListQuery, CreateBusinessRequest, Pagination, UpdateBusinessRequest},
    response,
    routes::AppState,
};
use crate::db::models::Business;
use crate::db::repositories::BusinessRepository;
use crate::db::DatabasePool;

/// Load a business the caller may access
pub(crate) async fn load_business(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<Business> {
    validate_uuid(id)?;
    let business = BusinessRepository::get_by_id(pool, id).await?;
    caller.authorize(business.as_ref().map(|b| b.user_id.clone()), "Business", id)?;
    business.ok_or_else(|| ApiError::NotFound(format!("Business not found: {}", id)))
}

/// Register a business for the caller
///
/// POST /api/v1/businesses
pub async fn create_business(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateBusinessRequest>,
) -> ApiResult<impl IntoResponse> {
    let eik = req.validate()?;
    let business = req.into_business(caller.id(), eik);

    let created = BusinessRepository::create(app_state.db.pool(), &business).await?;

    tracing::info!("Created business {} (EIK {})", created.id, created.eik);
    Ok(response::created(created))
}

/// List the caller's businesses (all of them for administrators)
///
/// GET /api/v1/businesses
pub async fn list_businesses(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<BusinessListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let businesses = BusinessRepository::list(pool, caller.scope(), paging.window()).await?;
    let total = BusinessRepository::count(pool, caller.scope()).await?;

    Ok(response::paginated(businesses, paging.page, paging.per_page, total))
}

/// GET /api/v1/businesses/:id
pub async fn get_business(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let business = load_business(app_state.db.pool(), &caller, &id).await?;
    Ok(response::ok(business))
}

/// PUT /api/v1/businesses/:id
pub async fn update_business(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateBusinessRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    let mut business = load_business(pool, &caller, &id).await?;
    req.apply(&mut business)?;

    let updated = BusinessRepository::update(pool, &business).await?;

    tracing::info!("Updated business {}", updated.id);
    Ok(response::ok(updated))
}

/// Delete a business and everything recorded under it
///
/// DELETE /api/v1/businesses/:id
pub async fn delete_business(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_business(pool, &caller, &id).await?;

    let removed = BusinessRepository::delete_cascade(pool, &id).await?;

    tracing::info!("Deleted business {} ({} rows removed)", id, removed);
    Ok(response::no_content())
}
