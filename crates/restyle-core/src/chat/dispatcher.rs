//! Event dispatch: commands, messages, and button presses.
//!
//! [`Dispatcher::handle`] is the single entry point for an inbound event. It
//! locks the sender's session, routes the event by kind and current dialogue
//! state, and logs (never propagates) failures so one bad interaction cannot
//! take down the bot.

use restyle_types::chat::{CallbackAction, ChatId, EventKind, IncomingEvent};
use restyle_types::error::TransportError;

use crate::chat::messages;
use crate::chat::session::{Dialogue, DialogueState, Session, SessionRegistry};
use crate::chat::transport::ChatTransport;
use crate::rewrite::gateway::RewriteGateway;
use crate::storage::style_store::StyleStore;

/// Routes inbound events through the creation, rewrite, and browsing flows.
pub struct Dispatcher<S, T, G> {
    pub(crate) store: S,
    pub(crate) transport: T,
    pub(crate) gateway: G,
    sessions: SessionRegistry,
}

impl<S, T, G> Dispatcher<S, T, G>
where
    S: StyleStore,
    T: ChatTransport,
    G: RewriteGateway,
{
    pub fn new(store: S, transport: T, gateway: G) -> Self {
        Self {
            store,
            transport,
            gateway,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, event: IncomingEvent) {
        let chat_id = event.chat_id;
        let key = event.session_key();
        let mut session = self.sessions.lock(key).await;

        let result = match event.kind {
            EventKind::Command { name, .. } => self.on_command(chat_id, &mut session, &name).await,
            EventKind::Text(text) => self.on_text(chat_id, &mut session, &text).await,
            EventKind::Document { file_id, file_name } => {
                self.on_document(chat_id, &mut session, &file_id, file_name.as_deref())
                    .await
            }
            EventKind::Callback { id, data } => {
                if let Err(e) = self.transport.answer_callback(&id).await {
                    tracing::warn!(error = %e, "failed to answer callback query");
                }
                self.on_callback(chat_id, &mut session, &data).await
            }
            EventKind::Unsupported => {
                tracing::debug!(chat_id, "ignoring unsupported message");
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!(chat_id, error = %e, "failed to deliver reply");
        }
        self.sessions.release(key, session);
    }

    async fn on_command(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        name: &str,
    ) -> Result<(), TransportError> {
        tracing::info!(chat_id, command = name, "command received");
        match name {
            "start" => self.transport.send_text(chat_id, messages::GREETING).await,
            "help" => {
                self.transport
                    .send_text(chat_id, &messages::command_menu())
                    .await
            }
            "newstyle" => {
                self.abandon(session).await;
                self.begin_creation(chat_id, session).await
            }
            "rewrite" => {
                self.abandon(session).await;
                self.begin_rewrite(chat_id, session).await
            }
            "liststyles" => self.list_styles(chat_id).await,
            "cancel" => match session.dialogue() {
                Some(Dialogue::Creation) => self.cancel_creation(chat_id, session).await,
                Some(Dialogue::Rewrite) => self.cancel_rewrite(chat_id, session).await,
                None => {
                    self.transport
                        .send_text(chat_id, messages::NOTHING_TO_CANCEL)
                        .await
                }
            },
            other => {
                tracing::debug!(chat_id, command = other, "ignoring unknown command");
                Ok(())
            }
        }
    }

    async fn on_text(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        text: &str,
    ) -> Result<(), TransportError> {
        match session.state {
            Some(DialogueState::AwaitingPrompt) => {
                self.receive_prompt(chat_id, session, text).await
            }
            Some(DialogueState::AwaitingExampleFile) => {
                self.transport
                    .send_text(chat_id, messages::ONLY_TXT_FILES)
                    .await
            }
            Some(DialogueState::AwaitingStyleName) => {
                self.receive_style_name(chat_id, session, text).await
            }
            Some(DialogueState::AwaitingStyleSelection) => {
                self.transport
                    .send_text(chat_id, messages::CHOOSE_STYLE_WITH_BUTTONS)
                    .await
            }
            Some(DialogueState::AwaitingPostText) => {
                self.receive_post(chat_id, session, text).await
            }
            None => {
                tracing::debug!(chat_id, "ignoring text outside a dialogue");
                Ok(())
            }
        }
    }

    async fn on_document(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        file_id: &str,
        file_name: Option<&str>,
    ) -> Result<(), TransportError> {
        match session.state {
            Some(DialogueState::AwaitingExampleFile) => {
                self.receive_example(chat_id, session, file_id, file_name)
                    .await
            }
            Some(DialogueState::AwaitingStyleName) => {
                self.transport
                    .send_text(chat_id, messages::STYLE_NAME_AS_TEXT)
                    .await
            }
            Some(DialogueState::AwaitingPostText) => {
                self.transport
                    .send_text(chat_id, messages::ASK_POST_TEXT)
                    .await
            }
            _ => {
                tracing::debug!(chat_id, "ignoring document outside the upload step");
                Ok(())
            }
        }
    }

    async fn on_callback(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        data: &str,
    ) -> Result<(), TransportError> {
        match CallbackAction::parse(data) {
            Some(CallbackAction::Inspect(name)) => self.inspect_style(chat_id, &name).await,
            Some(CallbackAction::Delete(name)) => self.delete_style(chat_id, &name).await,
            Some(CallbackAction::SelectForRewrite(name)) => {
                if session.state == Some(DialogueState::AwaitingStyleSelection) {
                    self.select_style(chat_id, session, &name).await
                } else {
                    self.transport
                        .send_text(chat_id, messages::SELECTION_EXPIRED)
                        .await
                }
            }
            None => {
                tracing::warn!(chat_id, data, "unrecognized callback data");
                Ok(())
            }
        }
    }

    /// Drop whatever dialogue is active so a new one can start.
    async fn abandon(&self, session: &mut Session) {
        if let Some(state) = session.state {
            tracing::info!(?state, "abandoning active dialogue");
        }
        if let Some(upload) = session.example_file.take() {
            self.store.discard_upload(&upload).await;
        }
        session.clear();
    }
}
