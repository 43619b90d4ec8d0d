//! Rewrite dialogue.
//!
//! `/rewrite` lists styles as buttons, a button press selects one, and the
//! next text message is sent through the rewrite gateway. The result (or the
//! gateway's error detail) ends the dialogue.

use std::fmt;

use restyle_types::chat::{Button, CallbackAction, ChatId};
use restyle_types::error::{GatewayError, StyleError, TransportError};
use restyle_types::rewrite::RewriteRequest;
use restyle_types::style::StyleName;

use crate::chat::dispatcher::Dispatcher;
use crate::chat::messages;
use crate::chat::session::{DialogueState, Session};
use crate::chat::transport::ChatTransport;
use crate::rewrite::gateway::RewriteGateway;
use crate::storage::style_store::StyleStore;
use crate::text::{split_message, truncate_chars, MAX_MESSAGE_LENGTH};

/// Characters of the example text included in logs.
const LOG_EXAMPLE_CHARS: usize = 500;

/// Why a rewrite attempt ended without a result.
#[derive(Debug)]
enum RewriteFailure {
    Style(StyleError),
    Gateway(GatewayError),
}

impl fmt::Display for RewriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(e) => write!(f, "{e}"),
            Self::Gateway(e) => write!(f, "{e}"),
        }
    }
}

impl RewriteFailure {
    fn user_message(&self, style: &StyleName) -> String {
        match self {
            Self::Style(StyleError::NotFound(_)) => messages::style_not_found(style.as_str()),
            Self::Style(StyleError::PromptNotFound(_)) => messages::PROMPT_MISSING.to_string(),
            Self::Style(e) => messages::style_read_failed(e),
            Self::Gateway(e) => messages::rewrite_failed(e),
        }
    }
}

impl<S, T, G> Dispatcher<S, T, G>
where
    S: StyleStore,
    T: ChatTransport,
    G: RewriteGateway,
{
    pub(crate) async fn begin_rewrite(
        &self,
        chat_id: ChatId,
        session: &mut Session,
    ) -> Result<(), TransportError> {
        let styles = match self.store.list_styles().await {
            Ok(styles) => styles,
            Err(e) => {
                tracing::error!(chat_id, error = %e, "listing styles failed");
                return self
                    .transport
                    .send_text(chat_id, &messages::style_list_failed(&e))
                    .await;
            }
        };

        if styles.is_empty() {
            return self.transport.send_text(chat_id, messages::NO_STYLES).await;
        }

        let buttons: Vec<Button> = styles
            .iter()
            .map(|name| Button::new(name.as_str(), &CallbackAction::SelectForRewrite(name.to_string())))
            .collect();

        self.transport
            .send_buttons(chat_id, messages::CHOOSE_STYLE_FOR_REWRITE, &buttons)
            .await?;
        session.state = Some(DialogueState::AwaitingStyleSelection);
        tracing::info!(chat_id, count = styles.len(), "offered styles for rewrite");
        Ok(())
    }

    pub(crate) async fn select_style(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        raw_name: &str,
    ) -> Result<(), TransportError> {
        let name = match StyleName::parse(raw_name) {
            Ok(name) if self.store.contains_style(&name).await => name,
            _ => {
                session.clear();
                return self
                    .transport
                    .send_text(chat_id, &messages::style_not_found(raw_name))
                    .await;
            }
        };

        tracing::info!(chat_id, style = %name, "style selected for rewrite");
        session.selected_style = Some(name);
        session.state = Some(DialogueState::AwaitingPostText);
        self.transport
            .send_text(chat_id, messages::STYLE_SELECTED)
            .await
    }

    pub(crate) async fn receive_post(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        text: &str,
    ) -> Result<(), TransportError> {
        if text.trim().is_empty() {
            return self
                .transport
                .send_text(chat_id, messages::ASK_POST_TEXT)
                .await;
        }

        let style = session.selected_style.take();
        session.clear();
        let Some(style) = style else {
            return self
                .transport
                .send_text(chat_id, messages::SELECTION_EXPIRED)
                .await;
        };

        match self.run_rewrite(&style, text).await {
            Ok(rewritten) => {
                tracing::info!(chat_id, style = %style, "text rewritten");
                let reply = format!("{}{}", messages::REWRITTEN_HEADER, rewritten);
                self.send_long(chat_id, &reply).await
            }
            Err(failure) => {
                tracing::error!(chat_id, style = %style, error = %failure, "rewrite failed");
                self.transport
                    .send_text(chat_id, &failure.user_message(&style))
                    .await
            }
        }
    }

    pub(crate) async fn cancel_rewrite(
        &self,
        chat_id: ChatId,
        session: &mut Session,
    ) -> Result<(), TransportError> {
        session.clear();
        self.transport
            .send_text(chat_id, messages::REWRITE_CANCELLED)
            .await
    }

    async fn run_rewrite(&self, style: &StyleName, post_text: &str) -> Result<String, RewriteFailure> {
        let system_prompt = self
            .store
            .get_style_prompt(style)
            .await
            .map_err(RewriteFailure::Style)?;
        let example_text = self
            .store
            .get_style_example(style)
            .await
            .map_err(RewriteFailure::Style)?;

        let system_prompt = system_prompt.trim().to_string();
        if system_prompt.is_empty() {
            return Err(RewriteFailure::Style(StyleError::PromptNotFound(
                style.to_string(),
            )));
        }

        tracing::debug!(
            style = %style,
            example = %truncate_chars(&example_text, LOG_EXAMPLE_CHARS),
            "loaded style example"
        );

        let request = RewriteRequest {
            system_prompt,
            example_text,
            post_text: post_text.to_string(),
        };
        let response = self
            .gateway
            .rewrite(&request)
            .await
            .map_err(RewriteFailure::Gateway)?;
        Ok(response.rewritten_text)
    }

    /// Send `text`, split into numbered parts past the message length limit.
    async fn send_long(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        let parts = split_message(text, MAX_MESSAGE_LENGTH);
        let total = parts.len();
        for (i, part) in parts.iter().enumerate() {
            self.transport.send_text(chat_id, part).await?;
            if total > 1 {
                tracing::info!(chat_id, part = i + 1, total, "sent message part");
            }
        }
        Ok(())
    }
}
