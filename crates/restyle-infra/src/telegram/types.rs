//! Telegram Bot API wire types.
//!
//! Only the fields the bot reads or sends are modelled; everything else in
//! the API payloads is ignored by serde.

use serde::{Deserialize, Serialize};

use restyle_types::chat::{Button, EventKind, IncomingEvent};

/// Envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgMessage {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub document: Option<Document>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<TgMessage>,
    pub data: Option<String>,
}

/// Result of `getFile`.
#[derive(Debug, Clone, Deserialize)]
pub struct TgFile {
    pub file_id: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// One button per row.
    pub fn single_column(buttons: &[Button]) -> Self {
        Self {
            inline_keyboard: buttons
                .iter()
                .map(|b| {
                    vec![InlineKeyboardButton {
                        text: b.label.clone(),
                        callback_data: b.data.clone(),
                    }]
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl Update {
    /// Translate into a transport-neutral event, or `None` for update kinds
    /// the bot does not subscribe to.
    pub fn into_event(self) -> Option<IncomingEvent> {
        if let Some(query) = self.callback_query {
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(IncomingEvent {
                chat_id,
                user_id: query.from.id,
                kind: EventKind::Callback {
                    id: query.id,
                    data: query.data.unwrap_or_default(),
                },
            });
        }

        let message = self.message?;
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);

        let kind = if let Some(doc) = message.document {
            EventKind::Document {
                file_id: doc.file_id,
                file_name: doc.file_name,
            }
        } else if let Some(text) = message.text.or(message.caption) {
            EventKind::parse_command(&text).unwrap_or(EventKind::Text(text))
        } else {
            EventKind::Unsupported
        };

        Some(IncomingEvent {
            chat_id,
            user_id,
            kind,
        })
    }
}
