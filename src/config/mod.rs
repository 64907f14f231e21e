//! # Configuration Management

pub mod settings;

pub use settings::{ObservabilityConfig, LOG_LEVELS};
