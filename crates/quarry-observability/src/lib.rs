//! # quarry-observability
//!
//! Structured tracing for the Quarry pipeline: subscriber setup, span
//! definitions per stage, and typed log events for retrieval, reranking,
//! answer parsing, and degradation.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV_VAR};
