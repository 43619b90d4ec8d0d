//! Rewriting: the service behind the HTTP gateway and the client-side port
//! the bot uses to reach it.

pub mod gateway;
pub mod service;
