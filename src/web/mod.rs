//! HTTP boundary for the catalog.
//!
//! Translates JSON requests into records, calls the services and maps results
//! and errors back to responses. Required-field validation and "not found"
//! handling live here, not in the services.

pub mod app;
pub mod dto;
pub mod extract;
pub mod handlers;

pub use app::{AppState, Paging, build_router};

use crate::core::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

#[derive(Debug)]
pub enum WebError {
    Database(DbError),
    Validation(Vec<String>),
    NotFound(String),
}

impl WebError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Database(DbError::DuplicateKey(_))
            | WebError::Database(DbError::InvalidArgument(_))
            | WebError::Database(DbError::UnknownField(..)) => StatusCode::BAD_REQUEST,
            WebError::Database(DbError::RecordNotFound { .. }) => StatusCode::NOT_FOUND,
            WebError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Validation(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<DbError> for WebError {
    fn from(err: DbError) -> Self {
        WebError::Database(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errors = match self {
            WebError::Database(err) if err.is_storage_error() => {
                error!(error = %err, "storage failure");
                vec!["internal storage error".to_string()]
            }
            WebError::Database(err) => vec![err.to_string()],
            WebError::Validation(errors) => errors,
            WebError::NotFound(msg) => vec![msg],
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::WebError;
    use crate::core::DbError;
    use axum::http::StatusCode;

    #[test]
    fn duplicate_key_is_a_client_error() {
        let err = WebError::from(DbError::DuplicateKey("name already registered".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let err = WebError::from(DbError::LockError("poisoned".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_record_is_not_found() {
        let err = WebError::from(DbError::RecordNotFound {
            kind: "product".into(),
            id: 3,
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(WebError::not_found("gone").status(), StatusCode::NOT_FOUND);
    }
}
