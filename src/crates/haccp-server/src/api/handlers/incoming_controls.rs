//! Incoming goods control endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::{validate_date_window, validate_uuid},
    models::{
        CreateIncomingControlRequest, IncomingControlListQuery, Pagination,
        UpdateIncomingControlRequest,
    },
    response,
    routes::AppState,
};
use crate::db::models::IncomingControl;
use crate::db::repositories::IncomingControlRepository;
use crate::db::DatabasePool;

use super::establishments::ensure_establishment;

async fn load_control(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<IncomingControl> {
    validate_uuid(id)?;
    let owner = IncomingControlRepository::owner_of(pool, id).await?;
    caller.authorize(owner, "Incoming control", id)?;
    IncomingControlRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Incoming control not found: {}", id)))
}

/// POST /api/v1/incoming-controls
pub async fn create_control(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateIncomingControlRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let created = IncomingControlRepository::create(pool, &req.into_control()).await?;

    if !created.is_accepted {
        tracing::warn!("Delivery {} from {} was rejected", created.id, created.supplier);
    }
    tracing::info!("Recorded incoming control {}", created.id);
    Ok(response::created(created))
}

/// GET /api/v1/incoming-controls?establishment_id=&from=&to=
pub async fn list_controls(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<IncomingControlListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let window = validate_date_window(query.from.as_deref(), query.to.as_deref())?;
    let pool = app_state.db.pool();

    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let controls =
        IncomingControlRepository::list(pool, caller.scope(), establishment_id, &window, paging.window()).await?;
    let total = IncomingControlRepository::count(pool, caller.scope(), establishment_id, &window).await?;

    Ok(response::paginated(controls, paging.page, paging.per_page, total))
}

/// GET /api/v1/incoming-controls/:id
pub async fn get_control(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let control = load_control(app_state.db.pool(), &caller, &id).await?;
    Ok(response::ok(control))
}

/// PUT /api/v1/incoming-controls/:id
pub async fn update_control(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateIncomingControlRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    let mut control = load_control(pool, &caller, &id).await?;
    req.apply(&mut control)?;

    let updated = IncomingControlRepository::update(pool, &control).await?;

    tracing::info!("Updated incoming control {}", updated.id);
    Ok(response::ok(updated))
}

/// DELETE /api/v1/incoming-controls/:id
pub async fn delete_control(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_control(pool, &caller, &id).await?;
    IncomingControlRepository::delete(pool, &id).await?;

    tracing::info!("Deleted incoming control {}", id);
    Ok(response::no_content())
}
