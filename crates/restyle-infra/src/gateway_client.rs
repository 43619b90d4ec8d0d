//! HTTP client for the rewrite gateway.
//!
//! One `POST {base}/rewrite` per call. Non-success responses are decoded as
//! `{detail}` so the remote error text reaches the user verbatim.

use restyle_core::rewrite::gateway::RewriteGateway;
use restyle_types::error::GatewayError;
use restyle_types::rewrite::{ErrorDetail, RewriteRequest, RewriteResponse};

/// Shown when an error response carries no readable `detail`.
const UNKNOWN_DETAIL: &str = "unknown error";

#[derive(Debug, Clone)]
pub struct HttpRewriteGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRewriteGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/rewrite", self.base_url)
    }
}

impl RewriteGateway for HttpRewriteGateway {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse, GatewayError> {
        let response = self
            .client
            .post(self.url())
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<RewriteResponse>()
                .await
                .map_err(|e| GatewayError::Malformed(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorDetail>(&body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| UNKNOWN_DETAIL.to_string());
        tracing::warn!(status = status.as_u16(), %detail, "rewrite gateway returned an error");

        Err(GatewayError::Remote {
            status: status.as_u16(),
            detail,
        })
    }
}
