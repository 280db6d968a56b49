//! # lumen-observability
//!
//! Tracing initialization, span macros, and structured log events.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};
