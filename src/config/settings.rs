//! # Configuration Settings
//!
//! Ambient settings for the rule action layer. The codec and transformer take
//! no configuration of their own; only diagnostics are tunable.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{Error, Result};

/// Accepted values for [`ObservabilityConfig::log_level`]
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: crate::APP_NAME.to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Build the configuration from `RULE_ACTIONS_*` environment variables,
    /// falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let service_name =
            std::env::var("RULE_ACTIONS_SERVICE_NAME").unwrap_or(defaults.service_name);

        let log_level = std::env::var("RULE_ACTIONS_LOG_LEVEL")
            .map(|level| level.to_lowercase())
            .unwrap_or(defaults.log_level);

        let json_logging = match std::env::var("RULE_ACTIONS_JSON_LOGGING") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::config(format!("Invalid RULE_ACTIONS_JSON_LOGGING: {}", e)))?,
            Err(_) => defaults.json_logging,
        };

        let config = Self { service_name, log_level, json_logging };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::config(format!(
                "Log level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.log_level
            )));
        }

        Ok(())
    }
}
