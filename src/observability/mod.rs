//! # Observability Infrastructure
//!
//! Structured logging for the codec and transformer.

pub mod logging;

pub use logging::init_logging;
