//! Style storage port.

pub mod style_store;
