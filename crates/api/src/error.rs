use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use newsroom_core::error::CoreError;
use newsroom_db::StoreError;
use serde_json::json;

use crate::response::{found, FormPage, FormView};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every failure maps to one of: a login
/// redirect, a form re-render, or a JSON `{"error", "code"}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `newsroom_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from `newsroom_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A submitted form failed validation; nothing was written.
    #[error("Form submission rejected")]
    InvalidForm(FormView),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message shared by missing rows and rows owned by someone else.
const NOT_FOUND_MESSAGE: &str = "Resource not found";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => match core {
                CoreError::AuthenticationRequired { login_redirect } => {
                    return found(login_redirect);
                }
                CoreError::Validation { field, message } => {
                    let mut form = FormView::new(&[field]);
                    form.add_error(field, message);
                    return (StatusCode::OK, Json(FormPage { form })).into_response();
                }
                CoreError::NotFound { entity, key } => {
                    tracing::debug!(entity, key = %key, "Not found");
                    not_found()
                }
                CoreError::NotOwner => {
                    tracing::debug!("Denied to non-owner");
                    not_found()
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::StorageUnavailable(msg) => {
                    tracing::error!(error = %msg, "Storage unavailable");
                    internal()
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Store(err) => return AppError::Core(err.into()).into_response(),

            AppError::InvalidForm(form) => {
                return (StatusCode::OK, Json(FormPage { form })).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

fn not_found() -> (StatusCode, &'static str, String) {
    (
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        NOT_FOUND_MESSAGE.to_string(),
    )
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
