//! Route handlers.

pub mod rewrite;
