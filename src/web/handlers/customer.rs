use super::ensure_valid;
use crate::core::RecordId;
use crate::model::Customer;
use crate::web::dto::{CustomerQuery, CustomerRequest, CustomerResponse, PageResponse};
use crate::web::extract::{AppJson, AppPath, AppQuery};
use crate::web::{AppState, Result, WebError};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    ensure_valid(payload.validate_create())?;

    let customer = Customer::new(
        payload.name.unwrap_or_default(),
        payload.tax_id.unwrap_or_default(),
    );
    let saved = state.db.customers().save(customer)?;
    info!(id = ?saved.id, "customer registered");

    Ok((StatusCode::CREATED, Json(saved.into())))
}

pub async fn get_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<Json<CustomerResponse>> {
    Ok(Json(find(&state, id)?.into()))
}

pub async fn update_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
    AppJson(payload): AppJson<CustomerRequest>,
) -> Result<Json<CustomerResponse>> {
    ensure_valid(payload.validate_update())?;

    let mut customer = find(&state, id)?;
    customer.name = payload.name.unwrap_or_default();
    let updated = state.db.customers().update(customer)?;

    Ok(Json(updated.into()))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<RecordId>,
) -> Result<StatusCode> {
    let customer = find(&state, id)?;
    state.db.customers().delete(&customer)?;
    info!(id, "customer deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_customers(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CustomerQuery>,
) -> Result<Json<PageResponse<CustomerResponse>>> {
    let page_request = state.paging.request(query.page, query.size)?;
    let page = state
        .db
        .customers()
        .find_matching(&query.example(), page_request)?;

    Ok(Json(page.map(CustomerResponse::from).into()))
}

fn find(state: &AppState, id: RecordId) -> Result<Customer> {
    state
        .db
        .customers()
        .get_by_id(id)?
        .ok_or_else(|| WebError::not_found("customer not found"))
}
