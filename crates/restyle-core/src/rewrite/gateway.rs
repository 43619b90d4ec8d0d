//! RewriteGateway trait: the bot's view of the remote rewrite endpoint.
//!
//! The HTTP implementation (`HttpRewriteGateway`) lives in restyle-infra.

use restyle_types::error::GatewayError;
use restyle_types::rewrite::{RewriteRequest, RewriteResponse};

/// Remote procedure call to the rewrite gateway.
///
/// One attempt per call: no retries, no caching, no timeout of its own.
pub trait RewriteGateway: Send + Sync {
    fn rewrite(
        &self,
        request: &RewriteRequest,
    ) -> impl std::future::Future<Output = Result<RewriteResponse, GatewayError>> + Send;
}
