//! Intermediate object helpers shared by every discriminated union.
//!
//! Encoding goes typed value → [`Object`] → tag injection → bytes, so the
//! helpers here operate on `serde_json` maps rather than on typed structs.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Error, Result};

/// Generic string-keyed intermediate representation of a wire object
pub type Object = Map<String, Value>;

/// Field name used in decode errors raised for the document as a whole
pub const ROOT_FIELD: &str = "$";

/// Base shape that keeps every key it is given.
///
/// Unions whose common fields are open-ended use this as their base shape so
/// that keys nobody consumes survive a decode/encode cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseFields {
    #[serde(flatten)]
    pub fields: Object,
}

impl BaseFields {
    /// Drop the keys that a variant consumes itself
    pub fn without(mut self, consumed: &[&str]) -> Self {
        self.fields.retain(|key, _| !consumed.contains(&key.as_str()));
        self
    }
}

/// Serialize a typed value into an intermediate object.
pub fn to_object<T: Serialize>(value: &T, target: &str) -> Result<Object> {
    match serde_json::to_value(value) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(Error::encoding(format!(
            "marshaling {target}: expected an object, found {}",
            value_kind(&other)
        ))),
        Err(err) => Err(Error::encoding_with_source(format!("marshaling {target}"), err)),
    }
}

/// Unconditionally (re)write a tag key on an object.
pub fn inject_tag(object: &mut Object, key: &str, tag: &str) {
    object.insert(key.to_string(), Value::String(tag.to_string()));
}

/// (Re)write a tag key on the object nested under `field`.
pub fn inject_nested_tag(object: &mut Object, field: &str, key: &str, tag: &str) -> Result<()> {
    match object.get_mut(field) {
        Some(Value::Object(nested)) => {
            inject_tag(nested, key, tag);
            Ok(())
        }
        Some(other) => Err(Error::encoding(format!(
            "cannot tag '{field}': expected an object, found {}",
            value_kind(other)
        ))),
        None => Err(Error::encoding(format!("cannot tag '{field}': field is missing"))),
    }
}

/// Copy base-shape fields into an intermediate object without overriding
/// anything the typed value already wrote.
pub fn merge_base_fields(object: &mut Object, base: &BaseFields) {
    for (key, value) in &base.fields {
        object.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

/// Read the discriminator of a decoded object.
pub fn read_discriminator(object: &Object, union: &str, key: &'static str) -> Result<String> {
    let value = object
        .get(key)
        .ok_or_else(|| Error::decode(union, key, serde_json::Error::missing_field(key)))?;

    String::deserialize(value).map_err(|err| Error::decode(union, key, err))
}

/// Decode a required field of an intermediate object.
pub fn decode_field<T: DeserializeOwned>(
    object: &Object,
    field: &'static str,
    target: &str,
) -> Result<T> {
    let value = object
        .get(field)
        .ok_or_else(|| Error::decode(target, field, serde_json::Error::missing_field(field)))?;

    T::deserialize(value).map_err(|err| Error::decode(target, field, err))
}

/// Parse a payload and re-serialize it with every object's keys sorted.
///
/// Two payloads are semantically equivalent when their canonical forms are
/// byte-for-byte equal.
pub fn canonicalize(bytes: &[u8]) -> Result<Vec<u8>> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| Error::decode("payload", ROOT_FIELD, err))?;

    serde_json::to_vec(&sort_keys(value))
        .map_err(|err| Error::encoding_with_source("re-marshaling canonical payload", err))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
