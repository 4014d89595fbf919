use super::ensure_valid;
use crate::core::RecordId;
use crate::model::{Category, Product};
use crate::web::dto::{PageResponse, ProductQuery, ProductRequest, ProductResponse};
use crate::web::extract::{AppJson, AppPath, AppQuery};
use crate::web::{AppState, Result, WebError};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    ensure_valid(payload.validate_create())?;

    let category = payload
        .category_id()
        .map(|id| state.db.categories().get_by_id(id))
        .transpose()?
        .flatten()
        .ok_or_else(|| WebError::validation("category not found"))?;

    let mut product = Product {
        category_id: category.id,
        ..Product::default()
    };
    payload.apply_to(&mut product);
    let saved = state.db.products().save(product)?;
    info!(id = ?saved.id, category = ?saved.category_id, "product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse::new(saved, Some(category))),
    ))
}

pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<Json<ProductResponse>> {
    let product = find(&state, id)?;
    Ok(Json(respond(&state, product)?))
}

pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
    AppJson(payload): AppJson<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    ensure_valid(payload.validate_update())?;

    let mut product = find(&state, id)?;
    payload.apply_to(&mut product);
    let updated = state.db.products().update(product)?;

    Ok(Json(respond(&state, updated)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<StatusCode> {
    let product = find(&state, id)?;
    state.db.products().delete(&product)?;
    info!(id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> Result<Json<PageResponse<ProductResponse>>> {
    let page_request = state.paging.request(query.page, query.size)?;
    let page = state
        .db
        .products()
        .find_matching(&query.example(), page_request)?;

    let total_pages = page.total_pages();
    let content = page
        .content
        .into_iter()
        .map(|product| respond(&state, product))
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(PageResponse {
        content,
        page: page.page,
        size: page.size,
        total_elements: page.total_elements,
        total_pages,
    }))
}

fn find(state: &AppState, id: RecordId) -> Result<Product> {
    state
        .db
        .products()
        .get_by_id(id)?
        .ok_or_else(|| WebError::not_found("product not found"))
}

/// Embed the referenced category, if it still exists.
fn respond(state: &AppState, product: Product) -> Result<ProductResponse> {
    let category: Option<Category> = match product.category_id {
        Some(id) => state.db.categories().get_by_id(id)?,
        None => None,
    };
    Ok(ProductResponse::new(product, category))
}
