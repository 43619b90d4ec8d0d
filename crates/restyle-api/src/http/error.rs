//! Application error type mapping to HTTP responses.
//!
//! Every failure becomes `{"detail": "..."}` so gateway clients can show the
//! message to users unchanged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use restyle_types::error::RewriteError;
use restyle_types::rewrite::ErrorDetail;

#[derive(Debug)]
pub enum AppError {
    Rewrite(RewriteError),
}

impl From<RewriteError> for AppError {
    fn from(e: RewriteError) -> Self {
        AppError::Rewrite(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Rewrite(RewriteError::ModelCall(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        tracing::error!(status = status.as_u16(), %detail, "request failed");
        (status, Json(ErrorDetail { detail })).into_response()
    }
}
