//! Chat-side dialogue engine.

mod browse;
mod creation;
pub mod dispatcher;
pub mod messages;
mod rewrite;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
