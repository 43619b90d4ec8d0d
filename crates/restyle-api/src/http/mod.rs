//! HTTP layer for the rewrite gateway.
//!
//! Axum router exposing `POST /rewrite` and `GET /health`, with CORS and
//! request tracing.

pub mod error;
pub mod handlers;
pub mod router;
