//! Personnel endpoint handlers
//!
//! Every staff record is returned with its health-book status evaluated
//! for the current day.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use haccp_core::HealthBookStatus;

use crate::api::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    middleware::validate_uuid,
    models::{
        CreatePersonnelRequest, HealthBookQuery, Pagination, PersonnelListQuery, PersonnelResponse,
        UpdatePersonnelRequest,
    },
    response,
    routes::AppState,
};
use crate::db::models::Personnel;
use crate::db::repositories::PersonnelRepository;
use crate::db::DatabasePool;
use crate::services::today;

use super::establishments::ensure_establishment;

async fn load_person(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<Personnel> {
    validate_uuid(id)?;
    let owner = PersonnelRepository::owner_of(pool, id).await?;
    caller.authorize(owner, "Personnel", id)?;
    PersonnelRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Personnel not found: {}", id)))
}

/// POST /api/v1/personnel
pub async fn create_personnel(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreatePersonnelRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let created = PersonnelRepository::create(pool, &req.into_personnel()).await?;

    tracing::info!("Added personnel {} to establishment {}", created.id, created.establishment_id);
    let warn_days = app_state.logbook.health_book_warn_days;
    Ok(response::created(PersonnelResponse::evaluate(created, today(), warn_days)))
}

/// GET /api/v1/personnel?establishment_id=&status=
pub async fn list_personnel(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<PersonnelListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<HealthBookStatus>()
                .map_err(|e| ApiError::ValidationError(e.to_string()))
        })
        .transpose()?;

    let pool = app_state.db.pool();
    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let today = today();
    let warn_days = app_state.logbook.health_book_warn_days;
    let staff: Vec<PersonnelResponse> = PersonnelRepository::list(pool, caller.scope(), establishment_id)
        .await?
        .into_iter()
        .map(|p| PersonnelResponse::evaluate(p, today, warn_days))
        .filter(|p| status.map_or(true, |s| p.health_book_status == s))
        .collect();

    let total = staff.len() as i64;
    let page: Vec<_> = staff
        .into_iter()
        .skip((paging.page as usize) * (paging.per_page as usize))
        .take(paging.per_page as usize)
        .collect();

    Ok(response::paginated(page, paging.page, paging.per_page, total))
}

/// Active staff whose health book is missing, expired or about to expire
///
/// Soonest expiry first, missing books last.
///
/// GET /api/v1/personnel/health-books?establishment_id=&days=
pub async fn health_books(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<HealthBookQuery>,
) -> ApiResult<impl IntoResponse> {
    let warn_days = query.days.unwrap_or(app_state.logbook.health_book_warn_days);
    if !(0..=365).contains(&warn_days) {
        return Err(ApiError::ValidationError("days must be between 0 and 365".to_string()));
    }

    let pool = app_state.db.pool();
    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let today = today();
    let mut flagged: Vec<PersonnelResponse> = PersonnelRepository::list(pool, caller.scope(), establishment_id)
        .await?
        .into_iter()
        .filter(|p| p.is_active)
        .map(|p| PersonnelResponse::evaluate(p, today, warn_days))
        .filter(|p| p.health_book_status.needs_attention())
        .collect();
    flagged.sort_by_key(|p| p.days_remaining.unwrap_or(i64::MAX));

    Ok(response::ok(flagged))
}

/// GET /api/v1/personnel/:id
pub async fn get_personnel(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let person = load_person(app_state.db.pool(), &caller, &id).await?;
    let warn_days = app_state.logbook.health_book_warn_days;
    Ok(response::ok(PersonnelResponse::evaluate(person, today(), warn_days)))
}

/// PUT /api/v1/personnel/:id
pub async fn update_personnel(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdatePersonnelRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    let mut person = load_person(pool, &caller, &id).await?;
    req.apply(&mut person)?;

    let updated = PersonnelRepository::update(pool, &person).await?;

    tracing::info!("Updated personnel {}", updated.id);
    let warn_days = app_state.logbook.health_book_warn_days;
    Ok(response::ok(PersonnelResponse::evaluate(updated, today(), warn_days)))
}

/// DELETE /api/v1/personnel/:id
pub async fn delete_personnel(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_person(pool, &caller, &id).await?;
    PersonnelRepository::delete(pool, &id).await?;

    tracing::info!("Deleted personnel {}", id);
    Ok(response::no_content())
}
