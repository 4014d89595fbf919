use super::ensure_valid;
use crate::core::RecordId;
use crate::model::Category;
use crate::web::dto::{CategoryQuery, CategoryRequest, CategoryResponse, PageResponse};
use crate::web::extract::{AppJson, AppPath, AppQuery};
use crate::web::{AppState, Result, WebError};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    ensure_valid(payload.validate())?;

    let category = Category::new(payload.name.unwrap_or_default());
    let saved = state.db.categories().save(category)?;
    info!(id = ?saved.id, "category created");

    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<Json<CategoryResponse>> {
    let category = find(&state, id)?;
    Ok(Json(category.into()))
}

pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
    AppJson(payload): AppJson<CategoryRequest>,
) -> Result<Json<CategoryResponse>> {
    ensure_valid(payload.validate())?;

    let mut category = find(&state, id)?;
    category.name = payload.name.unwrap_or_default();
    let updated = state.db.categories().update(category)?;

    Ok(Json(updated.into()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<StatusCode> {
    let category = find(&state, id)?;
    state.db.categories().delete(&category)?;
    info!(id, "category deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CategoryQuery>,
) -> Result<Json<PageResponse<CategoryResponse>>> {
    let page_request = state.paging.request(query.page, query.size)?;
    let page = state
        .db
        .categories()
        .find_matching(&query.example(), page_request)?;

    Ok(Json(page.map(CategoryResponse::from).into()))
}

fn find(state: &AppState, id: RecordId) -> Result<Category> {
    state
        .db
        .categories()
        .get_by_id(id)?
        .ok_or_else(|| WebError::not_found("category not found"))
}
