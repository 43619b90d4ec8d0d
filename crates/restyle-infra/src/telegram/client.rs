//! TelegramClient -- concrete [`ChatTransport`] over the Telegram Bot API.
//!
//! Speaks the HTTPS JSON interface directly with `reqwest`. Also exposes the
//! runtime-only calls the transport trait does not cover: long polling with
//! `getUpdates` and command registration with `setMyCommands`.
//!
//! The bot token is part of every request URL, so it is kept in a
//! [`SecretString`] and stripped from `reqwest` errors before they are logged.

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use restyle_core::chat::transport::ChatTransport;
use restyle_types::chat::{Button, ChatId};
use restyle_types::error::TransportError;

use super::types::{
    ApiResponse, BotCommand, InlineKeyboardMarkup, SendMessage, TgFile, Update,
};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    client: reqwest::Client,
    token: SecretString,
    api_base: String,
}

// No Debug: the token must never reach logs.

impl TelegramClient {
    pub fn new(token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (tests, local Bot API servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base,
            self.token.expose_secret(),
            method
        )
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_base,
            self.token.expose_secret(),
            file_path
        )
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(request_error)?;
        let envelope: ApiResponse<T> = response.json().await.map_err(request_error)?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(TransportError::Api(format!("{method}: {description}")));
        }
        envelope
            .result
            .ok_or_else(|| TransportError::Api(format!("{method}: missing result")))
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        self.call(
            "getUpdates",
            &body,
            Some(Duration::from_secs(timeout_secs) + POLL_GRACE),
        )
        .await
    }

    /// Register the command menu shown by Telegram clients.
    pub async fn set_my_commands(&self, commands: &[(&str, &str)]) -> Result<(), TransportError> {
        let commands: Vec<BotCommand> = commands
            .iter()
            .map(|(command, description)| BotCommand {
                command: command.to_string(),
                description: description.to_string(),
            })
            .collect();
        let _: bool = self
            .call("setMyCommands", &serde_json::json!({ "commands": commands }), None)
            .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let body = SendMessage {
            chat_id,
            text,
            reply_markup,
        };
        let _: serde_json::Value = self.call("sendMessage", &body, None).await?;
        Ok(())
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    TransportError::Request(err.without_url().to_string())
}

fn download_error(err: impl std::fmt::Display) -> TransportError {
    TransportError::Download(err.to_string())
}

impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TransportError> {
        self.send_message(chat_id, text, None).await
    }

    async fn send_buttons(
        &self,
        chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> Result<(), TransportError> {
        self.send_message(chat_id, text, Some(InlineKeyboardMarkup::single_column(buttons)))
            .await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &serde_json::json!({ "callback_query_id": callback_id }),
                None,
            )
            .await?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> Result<(), TransportError> {
        let file: TgFile = self
            .call("getFile", &serde_json::json!({ "file_id": file_id }), None)
            .await?;
        let file_path = file
            .file_path
            .ok_or_else(|| download_error(format!("no download path for file {}", file.file_id)))?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .map_err(|e| download_error(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(download_error(format!("HTTP {status}")));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.without_url()))?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(download_error)?;
        }
        tokio::fs::write(dest, &bytes).await.map_err(download_error)?;
        tracing::debug!(file_id, bytes = bytes.len(), "file downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";

    fn client(server: &MockServer) -> TelegramClient {
        TelegramClient::new(SecretString::from(TOKEN.to_string())).with_api_base(server.uri())
    }

    fn ok(result: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": result}))
    }

    #[tokio::test]
    async fn test_send_buttons_posts_inline_keyboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_partial_json(serde_json::json!({
                "chat_id": 42,
                "text": "Pick one",
                "reply_markup": {"inline_keyboard": [[{"text": "casual", "callback_data": "style_casual"}]]}
            })))
            .respond_with(ok(serde_json::json!({"message_id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let buttons = [Button {
            label: "casual".into(),
            data: "style_casual".into(),
        }];
        client(&server)
            .send_buttons(42, "Pick one", &buttons)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_api_error_carries_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: message is too long"
            })))
            .mount(&server)
            .await;

        let err = client(&server).send_text(42, "hi").await.unwrap_err();
        assert!(matches!(err, TransportError::Api(ref m) if m.contains("message is too long")));
    }

    #[tokio::test]
    async fn test_get_updates_parses_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getUpdates")))
            .and(body_partial_json(serde_json::json!({"offset": 7, "timeout": 0})))
            .respond_with(ok(serde_json::json!([
                {"update_id": 7, "message": {"message_id": 1, "chat": {"id": 1}, "text": "/start"}},
                {"update_id": 8, "callback_query": {"id": "c", "from": {"id": 2}, "data": "style_x"}}
            ])))
            .mount(&server)
            .await;

        let updates = client(&server).get_updates(7, 0).await.unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].update_id, 8);
    }

    #[tokio::test]
    async fn test_download_file_writes_destination() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .and(body_partial_json(serde_json::json!({"file_id": "F1"})))
            .respond_with(ok(serde_json::json!({"file_id": "F1", "file_path": "documents/file_1.txt"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/file/bot{TOKEN}/documents/file_1.txt")))
            .respond_with(ResponseTemplate::new(200).set_body_string("Dear Sir."))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("styles").join(".upload-1.txt");
        client(&server).download_file("F1", &dest).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&dest).await.unwrap(), "Dear Sir.");
    }

    #[tokio::test]
    async fn test_download_without_path_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getFile")))
            .respond_with(ok(serde_json::json!({"file_id": "F1"})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.txt");
        let err = client(&server).download_file("F1", &dest).await.unwrap_err();
        assert!(matches!(err, TransportError::Download(_)));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_set_my_commands() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/setMyCommands")))
            .and(body_partial_json(serde_json::json!({
                "commands": [{"command": "start", "description": "Start"}]
            })))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .set_my_commands(&[("start", "Start")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_request_errors_do_not_leak_token() {
        let client = TelegramClient::new(SecretString::from(TOKEN.to_string())).with_api_base("http://127.0.0.1:1");
        let err = client.send_text(1, "hi").await.unwrap_err();
        assert!(!err.to_string().contains(TOKEN));
    }
}
