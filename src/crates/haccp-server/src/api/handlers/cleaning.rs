//! Cleaning template and cleaning log endpoint handlers

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
        CleaningLogListQuery, CleaningTemplateListQuery, CreateCleaningLogRequest,
        CreateCleaningTemplateRequest, Pagination, UpdateCleaningTemplateRequest,
    },
    response,
    routes::AppState,
};
use crate::db::repositories::CleaningRepository;

use super::establishments::ensure_establishment;

/// POST /api/v1/cleaning-templates
pub async fn create_template(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateCleaningTemplateRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let created = CleaningRepository::create_template(pool, &req.into_template()).await?;

    tracing::info!("Created cleaning template {}", created.id);
    Ok(response::created(created))
}

/// GET /api/v1/cleaning-templates?establishment_id=
pub async fn list_templates(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<CleaningTemplateListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let templates =
        CleaningRepository::list_templates(pool, caller.scope(), establishment_id, paging.window()).await?;
    let total = CleaningRepository::count_templates(pool, caller.scope(), establishment_id).await?;

    Ok(response::paginated(templates, paging.page, paging.per_page, total))
}

/// PUT /api/v1/cleaning-templates/:id
pub async fn update_template(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCleaningTemplateRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(CleaningRepository::template_owner(pool, &id).await?, "Cleaning template", &id)?;

    let mut template = CleaningRepository::get_template(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Cleaning template not found: {}", id)))?;
    req.apply(&mut template)?;

    let updated = CleaningRepository::update_template(pool, &template).await?;

    tracing::info!("Updated cleaning template {}", updated.id);
    Ok(response::ok(updated))
}

/// Delete a template; logs made from it keep their area and task
///
/// DELETE /api/v1/cleaning-templates/:id
pub async fn delete_template(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(CleaningRepository::template_owner(pool, &id).await?, "Cleaning template", &id)?;

    CleaningRepository::delete_template(pool, &id).await?;

    tracing::info!("Deleted cleaning template {}", id);
    Ok(response::no_content())
}

/// POST /api/v1/cleaning-logs
pub async fn create_log(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateCleaningLogRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let template = match req.template_id.as_deref() {
        Some(template_id) => Some(
            CleaningRepository::get_template(pool, template_id)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Cleaning template not found: {}", template_id)))?,
        ),
        None => None,
    };

    let log = req.into_log(template.as_ref())?;
    let created = CleaningRepository::create_log(pool, &log).await?;

    tracing::info!("Recorded cleaning {} ({})", created.id, created.status);
    Ok(response::created(created))
}

/// GET /api/v1/cleaning-logs?establishment_id=&from=&to=
pub async fn list_logs(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<CleaningLogListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let window = validate_date_window(query.from.as_deref(), query.to.as_deref())?;
    let pool = app_state.db.pool();

    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let logs =
        CleaningRepository::list_logs(pool, caller.scope(), establishment_id, &window, paging.window()).await?;
    let total = CleaningRepository::count_logs(pool, caller.scope(), establishment_id, &window).await?;

    Ok(response::paginated(logs, paging.page, paging.per_page, total))
}

/// DELETE /api/v1/cleaning-logs/:id
pub async fn delete_log(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(CleaningRepository::log_owner(pool, &id).await?, "Cleaning log", &id)?;

    CleaningRepository::delete_log(pool, &id).await?;

    tracing::info!("Deleted cleaning log {}", id);
    Ok(response::no_content())
}
