//! Rewrite handler.

use axum::extract::State;
use axum::Json;

use restyle_core::text::truncate_chars;
use restyle_types::rewrite::{RewriteRequest, RewriteResponse};

use crate::http::error::AppError;
use crate::state::GatewayState;

const LOG_PREVIEW_CHARS: usize = 100;

/// POST /rewrite - Rewrite a post in the given style.
pub async fn rewrite(
    State(state): State<GatewayState>,
    Json(body): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    tracing::info!(
        post_chars = body.post_text.chars().count(),
        example_chars = body.example_text.chars().count(),
        "rewrite requested"
    );

    let response = state.rewrite.rewrite(&body).await?;

    tracing::info!(
        preview = %truncate_chars(&response.rewritten_text, LOG_PREVIEW_CHARS),
        "rewrite served"
    );
    Ok(Json(response))
}
