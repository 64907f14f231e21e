//! Flat attribute maps as handed over by the configuration reader.
//!
//! Values are already coerced to one of three primitive shapes. A
//! [`BlockReader`] is the only place that inspects a raw map; everything past
//! it works with typed blocks.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::actions::ActionKind;
use crate::errors::{Error, Result};

/// One attribute value of a configuration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// Whether the value counts as "set" for cross-field rules
    pub fn is_set(&self) -> bool {
        match self {
            AttributeValue::Bool(value) => *value,
            AttributeValue::String(value) => !value.is_empty(),
            AttributeValue::List(values) => !values.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "a bool",
            AttributeValue::String(_) => "a string",
            AttributeValue::List(_) => "a list of strings",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::List(values)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        AttributeValue::List(values.into_iter().map(String::from).collect())
    }
}

/// One configuration block: attribute name → value
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Typed, error-reporting view over one block of a given kind.
pub struct BlockReader<'a> {
    kind: ActionKind,
    index: usize,
    attributes: &'a AttributeMap,
}

impl<'a> BlockReader<'a> {
    /// Open a block, rejecting attributes that are not part of its shape.
    pub fn new(
        kind: ActionKind,
        index: usize,
        attributes: &'a AttributeMap,
        fields: &[&str],
    ) -> Result<Self> {
        let reader = Self { kind, index, attributes };

        if let Some(unknown) = attributes.keys().find(|key| !fields.contains(&key.as_str())) {
            return Err(reader.error(
                unknown,
                format!("{unknown:?} is not a supported attribute, expected one of {fields:?}"),
            ));
        }

        Ok(reader)
    }

    /// Optional string, defaulting to `""`
    pub fn string(&self, field: &str) -> Result<String> {
        match self.attributes.get(field) {
            None => Ok(String::new()),
            Some(AttributeValue::String(value)) => Ok(value.clone()),
            Some(other) => Err(self.type_error(field, "a string", other)),
        }
    }

    /// String that must be present (it may still be empty)
    pub fn required_string(&self, field: &str) -> Result<String> {
        if !self.attributes.contains_key(field) {
            return Err(self.missing(field));
        }
        self.string(field)
    }

    /// Optional bool, defaulting to `false`
    pub fn bool(&self, field: &str) -> Result<bool> {
        match self.attributes.get(field) {
            None => Ok(false),
            Some(AttributeValue::Bool(value)) => Ok(*value),
            Some(other) => Err(self.type_error(field, "a bool", other)),
        }
    }

    /// Optional ordered list, defaulting to empty
    pub fn list(&self, field: &str) -> Result<Vec<String>> {
        match self.attributes.get(field) {
            None => Ok(Vec::new()),
            Some(AttributeValue::List(values)) => Ok(values.clone()),
            Some(other) => Err(self.type_error(field, "a list of strings", other)),
        }
    }

    /// Enum that must be present and valid
    pub fn required_enum<E>(&self, field: &str) -> Result<E>
    where
        E: FromStr + VariantNames,
    {
        if !self.attributes.contains_key(field) {
            return Err(self.missing(field));
        }
        let raw = self.string(field)?;
        self.parse_enum(field, &raw)
    }

    /// Enum where `""` or absence means "not set"
    pub fn optional_enum<E>(&self, field: &str) -> Result<Option<E>>
    where
        E: FromStr + VariantNames,
    {
        let raw = self.string(field)?;
        if raw.is_empty() {
            return Ok(None);
        }
        self.parse_enum(field, &raw).map(Some)
    }

    /// Validation error attached to this block
    pub fn error(&self, field: &str, message: impl Into<String>) -> Error {
        Error::validation_field(self.kind.config_name(), self.index, field, message)
    }

    fn parse_enum<E>(&self, field: &str, raw: &str) -> Result<E>
    where
        E: FromStr + VariantNames,
    {
        E::from_str(raw).map_err(|_| {
            self.error(
                field,
                format!("{field:?} must be one of {:?}, got {raw:?}", E::VARIANTS),
            )
        })
    }

    fn missing(&self, field: &str) -> Error {
        self.error(field, format!("{field:?} is required"))
    }

    fn type_error(&self, field: &str, expected: &str, found: &AttributeValue) -> Error {
        self.error(
            field,
            format!("{field:?} must be {expected}, found {}", found.type_name()),
        )
    }
}
