//! Infrastructure adapters for restyle.
//!
//! Implements the ports defined in `restyle-core`: the filesystem style
//! store, the Telegram Bot API transport, the HTTP rewrite-gateway client,
//! and the OpenAI-compatible completion provider. Also hosts configuration
//! loading.

pub mod config;
pub mod filesystem;
pub mod gateway_client;
pub mod llm;
pub mod telegram;
