//! # Error Types
//!
//! Error types for the rule action codec and transformer using `thiserror`.

/// Custom result type for codec and transformer operations
pub type Result<T> = std::result::Result<T, RuleActionError>;

/// Main error type for the rule action layer
#[derive(thiserror::Error, Debug)]
pub enum RuleActionError {
    /// Malformed wire payload
    #[error("Decode error: unable to decode field '{field}' of {target}: {source}")]
    Decode {
        target: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// Discriminator value that selects no known variant
    #[error("Decode error: unrecognized {union} discriminator {key}={value:?}")]
    UnknownDiscriminator {
        union: String,
        key: String,
        value: String,
    },

    /// Cross-field or shape violation in a configuration block
    #[error("the {block:?} block at index {index} is not valid, {message}")]
    Validation {
        block: String,
        index: usize,
        field: String,
        related_field: Option<String>,
        value: Option<String>,
        message: String,
    },

    /// Internal invariant failure while encoding a well-formed variant
    #[error("Encoding error: {context}")]
    Encoding {
        context: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Ambient configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RuleActionError {
    /// Create a decode error for a field of the given target type
    pub fn decode<T: Into<String>, F: Into<String>>(
        target: T,
        field: F,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            target: target.into(),
            field: field.into(),
            source,
        }
    }

    /// Create an unrecognized discriminator error
    pub fn unknown_discriminator<U: Into<String>, K: Into<String>, V: Into<String>>(
        union: U,
        key: K,
        value: V,
    ) -> Self {
        Self::UnknownDiscriminator {
            union: union.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a validation error for a single field of a block
    pub fn validation_field<B: Into<String>, F: Into<String>, M: Into<String>>(
        block: B,
        index: usize,
        field: F,
        message: M,
    ) -> Self {
        Self::Validation {
            block: block.into(),
            index,
            field: field.into(),
            related_field: None,
            value: None,
            message: message.into(),
        }
    }

    /// Create a validation error for a rule triggered by another field's value
    pub fn validation_rule<B, F, R, V, M>(
        block: B,
        index: usize,
        field: F,
        related_field: R,
        value: V,
        message: M,
    ) -> Self
    where
        B: Into<String>,
        F: Into<String>,
        R: Into<String>,
        V: Into<String>,
        M: Into<String>,
    {
        Self::Validation {
            block: block.into(),
            index,
            field: field.into(),
            related_field: Some(related_field.into()),
            value: Some(value.into()),
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding<S: Into<String>>(context: S) -> Self {
        Self::Encoding {
            context: context.into(),
            source: None,
        }
    }

    /// Create an encoding error with source
    pub fn encoding_with_source<S: Into<String>>(context: S, source: serde_json::Error) -> Self {
        Self::Encoding {
            context: context.into(),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Field the error is attached to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            RuleActionError::Decode { field, .. } => Some(field),
            RuleActionError::UnknownDiscriminator { key, .. } => Some(key),
            RuleActionError::Validation { field, .. } => Some(field),
            RuleActionError::Encoding { .. } | RuleActionError::Config { .. } => None,
        }
    }

    /// Whether the caller should surface this error to the user as a diagnostic
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RuleActionError::Decode { .. }
                | RuleActionError::UnknownDiscriminator { .. }
                | RuleActionError::Validation { .. }
                | RuleActionError::Config { .. }
        )
    }

    /// Check if this error should be retried
    ///
    /// Every failure here is a property of the input, so retrying can never help.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for RuleActionError {
    fn from(error: serde_json::Error) -> Self {
        Self::encoding_with_source("JSON serialization failed", error)
    }
}

impl From<validator::ValidationErrors> for RuleActionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Validation failed: {}", message))
    }
}
