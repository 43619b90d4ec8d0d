//! Rewrite service.
//!
//! Turns a [`RewriteRequest`] into a two-message completion call with fixed
//! sampling parameters and returns the trimmed first choice. Stateless: each
//! call is exactly one provider request.

use tracing::Instrument;

use restyle_types::error::RewriteError;
use restyle_types::llm::{CompletionRequest, Message};
use restyle_types::rewrite::{RewriteRequest, RewriteResponse};

use crate::llm::provider::LlmProvider;

/// Model every rewrite is sent to.
pub const REWRITE_MODEL: &str = "gpt-4o-mini";

/// Output token cap for a rewrite.
pub const REWRITE_MAX_TOKENS: u32 = 750;

/// Sampling temperature for a rewrite.
pub const REWRITE_TEMPERATURE: f64 = 0.7;

pub struct RewriteService<P> {
    provider: P,
}

impl<P: LlmProvider> RewriteService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Build the completion request for a rewrite.
    ///
    /// The system message carries the style prompt followed by the labelled
    /// example; the user message is the post text verbatim.
    pub fn build_request(request: &RewriteRequest) -> CompletionRequest {
        let system = format!(
            "{}\n\nHere is an example of the style:\n{}",
            request.system_prompt, request.example_text
        );

        CompletionRequest {
            model: REWRITE_MODEL.to_string(),
            messages: vec![Message::system(system), Message::user(&request.post_text)],
            max_tokens: REWRITE_MAX_TOKENS,
            temperature: Some(REWRITE_TEMPERATURE),
        }
    }

    /// Rewrite `request.post_text` in the requested style.
    pub async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse, RewriteError> {
        let completion_request = Self::build_request(request);

        let span = tracing::info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = REWRITE_MODEL,
            gen_ai.request.max_tokens = REWRITE_MAX_TOKENS,
            gen_ai.request.temperature = REWRITE_TEMPERATURE,
        );

        let response = self
            .provider
            .complete(&completion_request)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "model call failed");
                RewriteError::ModelCall(e.to_string())
            })?;

        let rewritten_text = response.content.trim().to_string();
        tracing::debug!(
            response_id = %response.id,
            model = %response.model,
            chars = rewritten_text.chars().count(),
            "completion received"
        );

        Ok(RewriteResponse { rewritten_text })
    }
}
