//! ChatTransport trait for abstracting the chat platform.
//!
//! The dialogue engine talks to users only through this trait. The Telegram
//! Bot API adapter lives in restyle-infra.

use std::path::Path;

use restyle_types::chat::{Button, ChatId};
use restyle_types::error::TransportError;

/// Outbound side of a chat platform.
pub trait ChatTransport: Send + Sync {
    /// Send a plain text message.
    fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Send a message with one inline button per row.
    fn send_buttons(
        &self,
        chat_id: ChatId,
        text: &str,
        buttons: &[Button],
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Acknowledge a button press.
    fn answer_callback(
        &self,
        callback_id: &str,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;

    /// Download an attached file to `dest`.
    fn download_file(
        &self,
        file_id: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}
