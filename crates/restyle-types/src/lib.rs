//! Shared domain types for restyle.
//!
//! Style names and records, the rewrite gateway wire format, LLM request
//! shapes, chat events, configuration, and the error enums shared by every
//! other crate.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod rewrite;
pub mod style;
