//! Transport-neutral chat events and button payloads.
//!
//! The bot runtime translates whatever its chat transport delivers into an
//! [`IncomingEvent`]; the dialogue engine only ever sees these types.

use serde::{Deserialize, Serialize};

/// Identifier of a chat (where replies go).
pub type ChatId = i64;

/// Identifier of the user who produced an event.
pub type UserId = i64;

/// Identity a conversation session is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

/// One inbound interaction from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingEvent {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub kind: EventKind,
}

impl IncomingEvent {
    pub fn session_key(&self) -> SessionKey {
        SessionKey {
            chat_id: self.chat_id,
            user_id: self.user_id,
        }
    }
}

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `/name args...`; `name` is lowercased and stripped of `/` and `@bot`.
    Command { name: String, args: String },
    /// Plain (non-command) text, or the caption of a media message.
    Text(String),
    /// A document attachment.
    Document {
        file_id: String,
        file_name: Option<String>,
    },
    /// An inline button press.
    Callback { id: String, data: String },
    /// Anything else (stickers, photos without captions, ...).
    Unsupported,
}

impl EventKind {
    /// Split `/cmd@bot rest` into a [`EventKind::Command`], or return `None`
    /// for text that is not a command.
    pub fn parse_command(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let rest = trimmed.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(EventKind::Command {
            name,
            args: args.to_string(),
        })
    }
}

/// An inline button rendered under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: &CallbackAction) -> Self {
        Self {
            label: label.into(),
            data: action.to_data(),
        }
    }
}

/// Telegram rejects `callback_data` longer than this many bytes.
pub const CALLBACK_DATA_LIMIT: usize = 64;

const REWRITE_PREFIX: &str = "rewrite_style_";
const DELETE_PREFIX: &str = "delete_style_";
const INSPECT_PREFIX: &str = "style_";

/// Decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// `style_<name>`
    Inspect(String),
    /// `delete_style_<name>`
    Delete(String),
    /// `rewrite_style_<name>`
    SelectForRewrite(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(name) = data.strip_prefix(REWRITE_PREFIX) {
            Some(Self::SelectForRewrite(name.to_string()))
        } else if let Some(name) = data.strip_prefix(DELETE_PREFIX) {
            Some(Self::Delete(name.to_string()))
        } else {
            data.strip_prefix(INSPECT_PREFIX)
                .map(|name| Self::Inspect(name.to_string()))
        }
    }

    /// Whether every button payload for `name` stays within
    /// [`CALLBACK_DATA_LIMIT`].
    pub fn fits(name: &str) -> bool {
        let longest = REWRITE_PREFIX
            .len()
            .max(DELETE_PREFIX.len())
            .max(INSPECT_PREFIX.len());
        longest + name.len() <= CALLBACK_DATA_LIMIT
    }

    pub fn to_data(&self) -> String {
        match self {
            Self::Inspect(name) => format!("{INSPECT_PREFIX}{name}"),
            Self::Delete(name) => format!("{DELETE_PREFIX}{name}"),
            Self::SelectForRewrite(name) => format!("{REWRITE_PREFIX}{name}"),
        }
    }
}
