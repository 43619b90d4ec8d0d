//! Wire types of the rewrite gateway (`POST /rewrite`).

use serde::{Deserialize, Serialize};

/// Body of `POST /rewrite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub system_prompt: String,
    pub example_text: String,
    pub post_text: String,
}

/// Successful `200` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub rewritten_text: String,
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
