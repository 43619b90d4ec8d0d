//! In-memory fakes for driving the dispatcher in tests.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use restyle_types::chat::{Button, ChatId, EventKind, IncomingEvent, SessionKey, UserId};
use restyle_types::error::{GatewayError, StyleError, TransportError};
use restyle_types::rewrite::{RewriteRequest, RewriteResponse};
use restyle_types::style::{Style, StyleName};

use crate::chat::dispatcher::Dispatcher;
use crate::chat::session::{DialogueState, Session};
use crate::chat::transport::ChatTransport;
use crate::rewrite::gateway::RewriteGateway;
use crate::storage::style_store::StyleStore;

pub const CHAT_ID: ChatId = 42;
pub const USER_ID: UserId = 7;

type Uploads = Arc<Mutex<HashMap<PathBuf, String>>>;

#[derive(Debug, Clone)]
struct MockStyle {
    prompt: Option<String>,
    example: String,
}

/// A committed style as seen by assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredStyle {
    pub prompt: String,
    pub example: String,
}

/// Style store over a map; uploads are shared with [`MockTransport`].
#[derive(Clone, Default)]
pub struct MockStore {
    styles: Arc<Mutex<BTreeMap<String, MockStyle>>>,
    uploads: Uploads,
    next_upload: Arc<AtomicUsize>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MockStore {
    pub fn insert(&self, name: &str, prompt: &str, example: &str) {
        self.styles.lock().unwrap().insert(
            name.to_string(),
            MockStyle {
                prompt: Some(prompt.to_string()),
                example: example.to_string(),
            },
        );
    }

    pub fn remove(&self, name: &str) {
        self.styles.lock().unwrap().remove(name);
    }

    /// Simulate a metadata record without a `Prompt:` line.
    pub fn drop_prompt(&self, name: &str) {
        if let Some(style) = self.styles.lock().unwrap().get_mut(name) {
            style.prompt = None;
        }
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn style(&self, name: &str) -> Option<StoredStyle> {
        self.styles.lock().unwrap().get(name).map(|s| StoredStyle {
            prompt: s.prompt.clone().unwrap_or_default(),
            example: s.example.clone(),
        })
    }

    pub fn names(&self) -> Vec<String> {
        self.styles.lock().unwrap().keys().cloned().collect()
    }

    pub fn has_upload(&self, path: &Path) -> bool {
        self.uploads.lock().unwrap().contains_key(path)
    }
}

impl StyleStore for MockStore {
    fn temp_upload_path(&self) -> PathBuf {
        let n = self.next_upload.fetch_add(1, Ordering::SeqCst);
        PathBuf::from(format!("styles/.upload-{n}.txt"))
    }

    async fn create_style(
        &self,
        raw_name: &str,
        prompt: &str,
        upload: &Path,
    ) -> Result<Style, StyleError> {
        let name = StyleName::sanitize(raw_name)?;
        if *self.fail_writes.lock().unwrap() {
            self.uploads.lock().unwrap().remove(upload);
            return Err(StyleError::StorageError("disk full".to_string()));
        }
        let example = self
            .uploads
            .lock()
            .unwrap()
            .remove(upload)
            .ok_or_else(|| StyleError::StorageError("upload missing".to_string()))?;
        self.styles.lock().unwrap().insert(
            name.to_string(),
            MockStyle {
                prompt: Some(prompt.to_string()),
                example,
            },
        );
        Ok(Style::new(name, prompt))
    }

    async fn list_styles(&self) -> Result<Vec<StyleName>, StyleError> {
        self.styles
            .lock()
            .unwrap()
            .keys()
            .map(|k| StyleName::parse(k))
            .collect()
    }

    async fn contains_style(&self, name: &StyleName) -> bool {
        self.styles.lock().unwrap().contains_key(name.as_str())
    }

    async fn get_style_prompt(&self, name: &StyleName) -> Result<String, StyleError> {
        let styles = self.styles.lock().unwrap();
        let style = styles
            .get(name.as_str())
            .ok_or_else(|| StyleError::NotFound(name.to_string()))?;
        style
            .prompt
            .clone()
            .ok_or_else(|| StyleError::PromptNotFound(name.to_string()))
    }

    async fn get_style_example(&self, name: &StyleName) -> Result<String, StyleError> {
        self.styles
            .lock()
            .unwrap()
            .get(name.as_str())
            .map(|s| s.example.trim().to_string())
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    async fn delete_style(&self, name: &StyleName) -> Result<(), StyleError> {
        self.styles
            .lock()
            .unwrap()
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| StyleError::NotFound(name.to_string()))
    }

    async fn discard_upload(&self, upload: &Path) {
        self.uploads.lock().unwrap().remove(upload);
    }
}

/// One outbound message recorded by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Buttons { text: String, buttons: Vec<Button> },
}

/// Records outbound messages; serves downloads from a fixed file table.
#[derive(Clone, Default)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<Sent>>>,
    files: Arc<Mutex<HashMap<String, String>>>,
    uploads: Uploads,
    answered: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn put_file(&self, file_id: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(file_id.to_string(), content.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text of the most recent outbound message of either kind.
    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|s| match s {
            Sent::Text(text) | Sent::Buttons { text, .. } => text.clone(),
        })
    }

    pub fn answered(&self) -> usize {
        self.answered.load(Ordering::SeqCst)
    }
}

impl ChatTransport for MockTransport {
    async fn send_text(&self, _chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_buttons(
        &self,
        _chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Buttons {
            text: text.to_string(),
            buttons: buttons.to_vec(),
        });
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str) -> Result<(), TransportError> {
        self.answered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<(), TransportError> {
        let content = self
            .files
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| TransportError::Download(format!("unknown file id {file_id}")))?;
        self.uploads
            .lock()
            .unwrap()
            .insert(dest.to_path_buf(), content);
        Ok(())
    }
}

/// Gateway returning a queued reply and recording requests.
#[derive(Clone, Default)]
pub struct MockGateway {
    reply: Arc<Mutex<Option<Result<String, GatewayError>>>>,
    requests: Arc<Mutex<Vec<RewriteRequest>>>,
}

impl MockGateway {
    pub fn reply_with(&self, reply: Result<String, GatewayError>) {
        *self.reply.lock().unwrap() = Some(reply);
    }

    pub fn requests(&self) -> Vec<RewriteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl RewriteGateway for MockGateway {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResponse, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("rewritten".to_string()));
        reply.map(|rewritten_text| RewriteResponse { rewritten_text })
    }
}

/// A dispatcher wired to fakes, driven as a single user.
pub struct Harness {
    pub dispatcher: Dispatcher<MockStore, MockTransport, MockGateway>,
    pub store: MockStore,
    pub transport: MockTransport,
    pub gateway: MockGateway,
}

impl Harness {
    pub fn new() -> Self {
        let uploads = Uploads::default();
        let store = MockStore {
            uploads: uploads.clone(),
            ..Default::default()
        };
        let transport = MockTransport {
            uploads,
            ..Default::default()
        };
        let gateway = MockGateway::default();
        let dispatcher = Dispatcher::new(store.clone(), transport.clone(), gateway.clone());
        Self {
            dispatcher,
            store,
            transport,
            gateway,
        }
    }

    fn key() -> SessionKey {
        SessionKey {
            chat_id: CHAT_ID,
            user_id: USER_ID,
        }
    }

    async fn send(&self, kind: EventKind) {
        self.dispatcher
            .handle(IncomingEvent {
                chat_id: CHAT_ID,
                user_id: USER_ID,
                kind,
            })
            .await;
    }

    pub async fn command(&self, name: &str) {
        self.send(EventKind::Command {
            name: name.to_string(),
            args: String::new(),
        })
        .await;
    }

    pub async fn text(&self, text: &str) {
        self.send(EventKind::Text(text.to_string())).await;
    }

    pub async fn document(&self, file_id: &str, file_name: Option<&str>) {
        self.send(EventKind::Document {
            file_id: file_id.to_string(),
            file_name: file_name.map(str::to_string),
        })
        .await;
    }

    pub async fn callback(&self, data: &str) {
        self.send(EventKind::Callback {
            id: "cb-1".to_string(),
            data: data.to_string(),
        })
        .await;
    }

    pub async fn session(&self) -> Session {
        self.dispatcher.sessions().snapshot(Self::key()).await
    }

    pub async fn state(&self) -> Option<DialogueState> {
        self.session().await.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_help_do_not_open_a_dialogue() {
        let h = Harness::new();
        h.command("start").await;
        h.command("help").await;

        let sent = h.transport.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[1], Sent::Text(t) if t.contains("/rewrite - ")));
        assert!(!h.session().await.is_active());
    }

    #[tokio::test]
    async fn test_cancel_without_dialogue() {
        let h = Harness::new();
        h.command("cancel").await;
        assert_eq!(
            h.transport.last_text(),
            Some("There is nothing to cancel.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unknown_command_and_idle_text_are_ignored() {
        let h = Harness::new();
        h.command("frobnicate").await;
        h.text("hello").await;
        h.send(EventKind::Unsupported).await;
        assert!(h.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_users_have_separate_sessions() {
        let h = Harness::new();
        h.command("newstyle").await;

        h.dispatcher
            .handle(IncomingEvent {
                chat_id: CHAT_ID,
                user_id: USER_ID + 1,
                kind: EventKind::Text("not a prompt".to_string()),
            })
            .await;

        assert_eq!(h.state().await, Some(DialogueState::AwaitingPrompt));
        assert!(h.session().await.prompt.is_none());
    }

    #[tokio::test]
    async fn test_finished_dialogues_leave_no_session_slot() {
        let h = Harness::new();
        h.command("start").await;
        assert!(h.dispatcher.sessions().is_empty());

        h.command("newstyle").await;
        assert_eq!(h.dispatcher.sessions().len(), 1);

        h.command("cancel").await;
        assert!(h.dispatcher.sessions().is_empty());
    }
}
