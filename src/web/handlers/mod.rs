pub mod category;
pub mod customer;
pub mod product;

use super::dto::HealthResponse;
use super::{Result, WebError};
use axum::Json;

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Turn a non-empty validation report into an error.
fn ensure_valid(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(WebError::Validation(errors))
    }
}
