//! Style browsing: `/liststyles`, inspecting a style, deleting it.
//!
//! None of these touch the caller's dialogue state.

use restyle_types::chat::{Button, CallbackAction, ChatId};
use restyle_types::error::{StyleError, TransportError};
use restyle_types::style::{StyleName, PROMPT_PLACEHOLDER};

use crate::chat::dispatcher::Dispatcher;
use crate::chat::messages;
use crate::chat::transport::ChatTransport;
use crate::rewrite::gateway::RewriteGateway;
use crate::storage::style_store::StyleStore;

impl<S, T, G> Dispatcher<S, T, G>
where
    S: StyleStore,
    T: ChatTransport,
    G: RewriteGateway,
{
    pub(crate) async fn list_styles(&self, chat_id: ChatId) -> Result<(), TransportError> {
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
            .map(|name| Button::new(name.as_str(), &CallbackAction::Inspect(name.to_string())))
            .collect();
        self.transport
            .send_buttons(chat_id, messages::ALL_STYLES, &buttons)
            .await
    }

    pub(crate) async fn inspect_style(
        &self,
        chat_id: ChatId,
        raw_name: &str,
    ) -> Result<(), TransportError> {
        let Ok(name) = StyleName::parse(raw_name) else {
            return self
                .transport
                .send_text(chat_id, &messages::style_not_found(raw_name))
                .await;
        };

        let prompt = match self.store.get_style_prompt(&name).await {
            Ok(prompt) => prompt,
            Err(StyleError::PromptNotFound(_)) => PROMPT_PLACEHOLDER.to_string(),
            Err(StyleError::NotFound(_)) => {
                return self
                    .transport
                    .send_text(chat_id, &messages::style_not_found(name.as_str()))
                    .await;
            }
            Err(e) => {
                tracing::error!(chat_id, style = %name, error = %e, "reading style failed");
                return self
                    .transport
                    .send_text(chat_id, &messages::style_read_failed(&e))
                    .await;
            }
        };

        let delete = Button::new(
            messages::DELETE_BUTTON,
            &CallbackAction::Delete(name.to_string()),
        );
        self.transport
            .send_buttons(
                chat_id,
                &messages::style_details(name.as_str(), &prompt),
                &[delete],
            )
            .await
    }

    pub(crate) async fn delete_style(
        &self,
        chat_id: ChatId,
        raw_name: &str,
    ) -> Result<(), TransportError> {
        let Ok(name) = StyleName::parse(raw_name) else {
            return self
                .transport
                .send_text(chat_id, &messages::style_not_found(raw_name))
                .await;
        };

        let reply = match self.store.delete_style(&name).await {
            Ok(()) => {
                tracing::info!(chat_id, style = %name, "style deleted");
                messages::style_deleted(name.as_str())
            }
            Err(StyleError::NotFound(_)) => messages::style_not_found(name.as_str()),
            Err(e) => {
                tracing::error!(chat_id, style = %name, error = %e, "deleting style failed");
                messages::style_delete_failed(&e)
            }
        };
        self.transport.send_text(chat_id, &reply).await
    }
}
