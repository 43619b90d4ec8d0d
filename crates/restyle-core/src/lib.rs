//! Business logic and port definitions for restyle.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! ([`storage::style_store::StyleStore`], [`chat::transport::ChatTransport`],
//! [`rewrite::gateway::RewriteGateway`], [`llm::provider::LlmProvider`]) and
//! the logic built on them: the per-user dialogue engine and the rewrite
//! service behind the HTTP gateway. It depends only on `restyle-types` --
//! never on `restyle-infra` or any HTTP/filesystem crate.

pub mod chat;
pub mod llm;
pub mod rewrite;
pub mod storage;
pub mod text;
