//! Food item and food diary endpoint handlers

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
        CreateFoodDiaryRequest, CreateFoodItemRequest, FoodDiaryListQuery, FoodItemListQuery,
        Pagination, UpdateFoodItemRequest,
    },
    response,
    routes::AppState,
};
use crate::db::models::FoodItem;
use crate::db::repositories::{FoodDiaryRepository, FoodItemRepository};
use crate::db::DatabasePool;

use super::establishments::ensure_establishment;

async fn load_item(pool: &DatabasePool, caller: &AuthUser, id: &str) -> ApiResult<FoodItem> {
    validate_uuid(id)?;
    let owner = FoodItemRepository::owner_of(pool, id).await?;
    caller.authorize(owner, "Food item", id)?;
    FoodItemRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Food item not found: {}", id)))
}

/// POST /api/v1/food-items
pub async fn create_item(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateFoodItemRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    ensure_establishment(pool, &caller, &req.establishment_id).await?;

    let created = FoodItemRepository::create(pool, &req.into_item()).await?;

    tracing::info!("Created food item {}", created.id);
    Ok(response::created(created))
}

/// GET /api/v1/food-items?establishment_id=
pub async fn list_items(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<FoodItemListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let pool = app_state.db.pool();

    let establishment_id = query.establishment_id.as_deref();
    if let Some(establishment_id) = establishment_id {
        ensure_establishment(pool, &caller, establishment_id).await?;
    }

    let items = FoodItemRepository::list(pool, caller.scope(), establishment_id, paging.window()).await?;
    let total = FoodItemRepository::count(pool, caller.scope(), establishment_id).await?;

    Ok(response::paginated(items, paging.page, paging.per_page, total))
}

/// GET /api/v1/food-items/:id
pub async fn get_item(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let item = load_item(app_state.db.pool(), &caller, &id).await?;
    Ok(response::ok(item))
}

/// PUT /api/v1/food-items/:id
pub async fn update_item(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateFoodItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    let mut item = load_item(pool, &caller, &id).await?;
    req.apply(&mut item)?;

    let updated = FoodItemRepository::update(pool, &item).await?;

    tracing::info!("Updated food item {}", updated.id);
    Ok(response::ok(updated))
}

/// DELETE /api/v1/food-items/:id
pub async fn delete_item(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = app_state.db.pool();
    load_item(pool, &caller, &id).await?;
    FoodItemRepository::delete(pool, &id).await?;

    tracing::info!("Deleted food item {}", id);
    Ok(response::no_content())
}

/// POST /api/v1/food-diary
pub async fn create_entry(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateFoodDiaryRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;
    let pool = app_state.db.pool();
    let item = load_item(pool, &caller, &req.food_item_id).await?;

    let created = FoodDiaryRepository::create(pool, &req.into_entry()).await?;

    if let Some(storage) = item.storage() {
        if !storage.default_range().contains(created.temperature) {
            tracing::warn!(
                "Food diary entry {} for {} is outside the {} range: {}",
                created.id,
                item.name,
                storage,
                created.temperature
            );
        }
    }
    tracing::info!("Recorded food diary entry {}", created.id);
    Ok(response::created(created))
}

/// GET /api/v1/food-diary?food_item_id=&from=&to=
pub async fn list_entries(
    State(app_state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<FoodDiaryListQuery>,
) -> ApiResult<impl IntoResponse> {
    let paging = Pagination::from_query(query.page, query.per_page)?;
    let window = validate_date_window(query.from.as_deref(), query.to.as_deref())?;
    let pool = app_state.db.pool();

    let food_item_id = query.food_item_id.as_deref();
    if let Some(food_item_id) = food_item_id {
        load_item(pool, &caller, food_item_id).await?;
    }

    let entries =
        FoodDiaryRepository::list(pool, caller.scope(), food_item_id, &window, paging.window()).await?;
    let total = FoodDiaryRepository::count(pool, caller.scope(), food_item_id, &window).await?;

    Ok(response::paginated(entries, paging.page, paging.per_page, total))
}

/// DELETE /api/v1/food-diary/:id
pub async fn delete_entry(
    State(app_state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    validate_uuid(&id)?;
    let pool = app_state.db.pool();
    caller.authorize(FoodDiaryRepository::owner_of(pool, &id).await?, "Food diary entry", &id)?;

    FoodDiaryRepository::delete(pool, &id).await?;

    tracing::info!("Deleted food diary entry {}", id);
    Ok(response::no_content())
}
