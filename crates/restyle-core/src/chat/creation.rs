//! Style-creation dialogue.
//!
//! `AwaitingPrompt -> AwaitingExampleFile -> AwaitingStyleName -> committed`.
//! Invalid input re-prompts without leaving the state; every terminal
//! transition clears the session.

use restyle_types::chat::{CallbackAction, ChatId};
use restyle_types::error::TransportError;
use restyle_types::style::StyleName;

use crate::chat::dispatcher::Dispatcher;
use crate::chat::messages;
use crate::chat::session::{DialogueState, Session};
use crate::chat::transport::ChatTransport;
use crate::rewrite::gateway::RewriteGateway;
use crate::storage::style_store::StyleStore;

const EXAMPLE_SUFFIX: &str = ".txt";

impl<S, T, G> Dispatcher<S, T, G>
where
    S: StyleStore,
    T: ChatTransport,
    G: RewriteGateway,
{
    pub(crate) async fn begin_creation(
        &self,
        chat_id: ChatId,
        session: &mut Session,
    ) -> Result<(), TransportError> {
        session.state = Some(DialogueState::AwaitingPrompt);
        self.transport.send_text(chat_id, messages::ASK_PROMPT).await
    }

    pub(crate) async fn receive_prompt(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        text: &str,
    ) -> Result<(), TransportError> {
        session.prompt = Some(text.to_string());
        session.state = Some(DialogueState::AwaitingExampleFile);
        self.transport
            .send_text(chat_id, messages::ASK_EXAMPLE_FILE)
            .await
    }

    pub(crate) async fn receive_example(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        file_id: &str,
        file_name: Option<&str>,
    ) -> Result<(), TransportError> {
        let is_txt = file_name.is_some_and(|name| name.ends_with(EXAMPLE_SUFFIX));
        if !is_txt {
            return self
                .transport
                .send_text(chat_id, messages::ONLY_TXT_FILES)
                .await;
        }

        let upload = self.store.temp_upload_path();
        if let Err(e) = self.transport.download_file(file_id, &upload).await {
            tracing::error!(chat_id, error = %e, "example download failed");
            self.store.discard_upload(&upload).await;
            return self
                .transport
                .send_text(chat_id, &messages::file_save_failed(&e))
                .await;
        }

        tracing::info!(chat_id, path = %upload.display(), "example file received");
        session.example_file = Some(upload);
        session.state = Some(DialogueState::AwaitingStyleName);
        self.transport
            .send_text(chat_id, messages::ASK_STYLE_NAME)
            .await
    }

    pub(crate) async fn receive_style_name(
        &self,
        chat_id: ChatId,
        session: &mut Session,
        text: &str,
    ) -> Result<(), TransportError> {
        let Ok(name) = StyleName::sanitize(text) else {
            return self
                .transport
                .send_text(chat_id, messages::INVALID_STYLE_NAME)
                .await;
        };
        if !CallbackAction::fits(name.as_str()) {
            return self
                .transport
                .send_text(chat_id, messages::STYLE_NAME_TOO_LONG)
                .await;
        }

        let prompt = session.prompt.take().unwrap_or_default();
        let Some(upload) = session.example_file.take() else {
            session.clear();
            return self
                .transport
                .send_text(chat_id, messages::MISSING_UPLOAD)
                .await;
        };
        session.clear();

        let reply = match self.store.create_style(text, &prompt, &upload).await {
            Ok(style) => {
                tracing::info!(chat_id, style = %style.name, "style created");
                messages::style_saved(style.name.as_str())
            }
            Err(e) => {
                tracing::error!(chat_id, error = %e, "style creation failed");
                self.store.discard_upload(&upload).await;
                messages::style_save_failed(&e)
            }
        };
        self.transport.send_text(chat_id, &reply).await
    }

    pub(crate) async fn cancel_creation(
        &self,
        chat_id: ChatId,
        session: &mut Session,
    ) -> Result<(), TransportError> {
        if let Some(upload) = session.example_file.take() {
            self.store.discard_upload(&upload).await;
        }
        session.clear();
        self.transport
            .send_text(chat_id, messages::CREATION_CANCELLED)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::chat::session::DialogueState;
    use crate::chat::testing::{Harness, Sent};

    #[tokio::test]
    async fn test_full_creation_flow_commits_style() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");

        h.command("newstyle").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingPrompt));

        h.text("Write formally").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingExampleFile));

        h.document("file-1", Some("example.txt")).await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingStyleName));
        let upload = h.session().await.example_file.unwrap();
        assert!(h.store.has_upload(&upload));

        h.text("Business Tone").await;
        assert_eq!(h.session().await, Default::default());

        let style = h.store.style("Business_Tone").unwrap();
        assert_eq!(style.prompt, "Write formally");
        assert_eq!(style.example, "Dear Sir.");
        assert!(!h.store.has_upload(&upload));
        assert_eq!(
            h.transport.last_text(),
            Some("Style 'Business_Tone' saved successfully!".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_txt_document_reprompts() {
        let h = Harness::new();
        h.command("newstyle").await;
        h.text("Write formally").await;

        h.document("file-1", Some("example.pdf")).await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingExampleFile));
        assert_eq!(
            h.transport.last_text(),
            Some("Please send a file with the .txt extension.".to_string())
        );

        h.text("here is my example").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingExampleFile));
    }

    #[tokio::test]
    async fn test_failed_download_stays_in_state() {
        let h = Harness::new();
        h.command("newstyle").await;
        h.text("Write formally").await;

        h.document("missing", Some("example.txt")).await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingExampleFile));
        assert!(h.session().await.example_file.is_none());
        assert!(h.transport.last_text().unwrap().starts_with("Error while saving the file"));
    }

    #[tokio::test]
    async fn test_invalid_name_reprompts() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");
        h.command("newstyle").await;
        h.text("Write formally").await;
        h.document("file-1", Some("example.txt")).await;

        h.text("!!!").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingStyleName));
        assert!(h.store.names().is_empty());

        h.text("casual").await;
        assert_eq!(h.store.names(), vec!["casual".to_string()]);
    }

    #[tokio::test]
    async fn test_storage_failure_reports_and_cleans_up() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");
        h.command("newstyle").await;
        h.text("Write formally").await;
        h.document("file-1", Some("example.txt")).await;
        let upload = h.session().await.example_file.unwrap();

        h.store.fail_writes();
        h.text("casual").await;

        assert!(!h.session().await.is_active());
        assert!(!h.store.has_upload(&upload));
        assert!(h
            .transport
            .last_text()
            .unwrap()
            .starts_with("Error while saving the style"));
    }

    #[tokio::test]
    async fn test_cancel_removes_pending_upload() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");
        h.command("newstyle").await;
        h.text("Write formally").await;
        h.document("file-1", Some("example.txt")).await;
        let upload = h.session().await.example_file.unwrap();

        h.command("cancel").await;
        assert_eq!(h.session().await, Default::default());
        assert!(!h.store.has_upload(&upload));
        assert_eq!(
            h.transport.sent().last(),
            Some(&Sent::Text("Style creation cancelled.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_commands_are_not_taken_as_prompt() {
        let h = Harness::new();
        h.command("newstyle").await;
        h.command("liststyles").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingPrompt));
        assert!(h.session().await.prompt.is_none());
    }

    #[tokio::test]
    async fn test_starting_rewrite_abandons_creation() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");
        h.command("newstyle").await;
        h.text("Write formally").await;
        h.document("file-1", Some("example.txt")).await;
        let upload = h.session().await.example_file.unwrap();

        h.command("rewrite").await;
        assert!(!h.store.has_upload(&upload));
        assert!(!h.session().await.is_active());
    }

    #[tokio::test]
    async fn test_name_too_long_for_buttons_reprompts() {
        let h = Harness::new();
        h.transport.put_file("file-1", "Dear Sir.");
        h.command("newstyle").await;
        h.text("Write formally").await;
        h.document("file-1", Some("example.txt")).await;
        let upload = h.session().await.example_file.unwrap();

        h.text("Деловой стиль для соцсетей компании").await;
        assert_eq!(h.state().await, Some(DialogueState::AwaitingStyleName));
        assert!(h.store.names().is_empty());
        assert!(h.store.has_upload(&upload));
        assert_eq!(
            h.transport.last_text(),
            Some(crate::chat::messages::STYLE_NAME_TOO_LONG.to_string())
        );

        h.text("Деловой стиль").await;
        assert_eq!(h.store.names(), vec!["Деловой_стиль".to_string()]);
    }
}
