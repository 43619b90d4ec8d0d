//! Observability setup for restyle binaries.

pub mod tracing_setup;
