//! # Structured Logging
//!
//! Span macros and subscriber setup on the tracing ecosystem. The library
//! itself only emits `debug`/`trace` events; installing a subscriber is left
//! to the embedding binary or test.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Create a tracing span for a codec or transformer operation.
///
/// ```rust,ignore
/// let span = codec_span!("expand", "request_header_action");
/// let span = codec_span!("decode", "DeliveryRuleAction", bytes = payload.len());
/// ```
#[macro_export]
macro_rules! codec_span {
    ($operation:expr, $subject:expr) => {
        tracing::debug_span!(
            "rule_action_operation",
            operation = %$operation,
            subject = %$subject
        )
    };
    ($operation:expr, $subject:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "rule_action_operation",
            operation = %$operation,
            subject = %$subject,
            $($field)*
        )
    };
}

/// Install the global fmt subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.log_level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| Error::config(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json_logging = config.json_logging,
        "Logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_compile() {
        let _span = codec_span!("encode", "DeliveryRuleAction");
        let _span = codec_span!("expand", "url_rewrite_action", blocks = 2);
    }

    #[test]
    fn test_init_logging_rejects_invalid_config() {
        let config = ObservabilityConfig { log_level: String::new(), ..Default::default() };
        assert!(init_logging(&config).is_err());
    }

    #[test]
    fn test_init_logging() {
        let result = init_logging(&ObservabilityConfig::default());
        // May fail if another test already installed a subscriber
        assert!(result.is_ok() || matches!(result, Err(Error::Config { .. })));
    }
}
