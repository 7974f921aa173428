//! Tracing initialization.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with_config};
