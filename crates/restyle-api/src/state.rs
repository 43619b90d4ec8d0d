//! Gateway application state.
//!
//! Pins the rewrite service to the OpenAI-compatible provider and shares it
//! across handlers.

use std::sync::Arc;

use restyle_core::rewrite::service::RewriteService;
use restyle_infra::llm::openai_compat::OpenAiCompatibleProvider;

pub type ConcreteRewriteService = RewriteService<OpenAiCompatibleProvider>;

#[derive(Clone)]
pub struct GatewayState {
    pub rewrite: Arc<ConcreteRewriteService>,
}

impl GatewayState {
    pub fn new(provider: OpenAiCompatibleProvider) -> Self {
        Self {
            rewrite: Arc::new(RewriteService::new(provider)),
        }
    }
}
