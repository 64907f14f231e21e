//! Common test utilities for all integration tests.
//!
//! Builders for configuration blocks and wire payloads.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

use rule_actions::transform::blocks::fields::*;
use rule_actions::{AttributeMap, AttributeValue};
use serde_json::Value;

/// Build a block from `(attribute, value)` pairs
pub fn block<I, V>(entries: I) -> AttributeMap
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<AttributeValue>,
{
    entries.into_iter().map(|(k, v)| (k.to_string(), v.into())).collect()
}

/// A header block with every attribute present
pub fn header_block(action: &str, name: &str, value: &str) -> AttributeMap {
    block([(HEADER_ACTION, action), (HEADER_NAME, name), (VALUE, value)])
}

/// A fully populated redirect block
pub fn redirect_block() -> AttributeMap {
    block([
        (REDIRECT_TYPE, "PermanentRedirect"),
        (REDIRECT_PROTOCOL, "Https"),
        (DESTINATION_PATH, "/new"),
        (DESTINATION_HOSTNAME, "www.example.com"),
        (QUERY_STRING, "ref=cdn"),
        (DESTINATION_FRAGMENT, "top"),
    ])
}

/// A fully populated rewrite block
pub fn rewrite_block(source: &str, destination: &str, preserve: bool) -> AttributeMap {
    let mut attributes = block([(SOURCE_PATTERN, source), (DESTINATION, destination)]);
    attributes.insert(PRESERVE_UNMATCHED_PATH.to_string(), preserve.into());
    attributes
}

/// A route override block in flattened form (every attribute present)
pub fn route_override_block(behavior: &str, parameters: &[&str]) -> AttributeMap {
    let mut attributes = block([
        (ORIGIN_GROUP_ID, ""),
        (FORWARDING_PROTOCOL, ""),
        (QUERY_STRING_CACHING_BEHAVIOR, behavior),
        (CACHE_BEHAVIOR, "OverrideIfOriginMissing"),
        (CACHE_DURATION, "1.12:00:00"),
    ]);
    attributes.insert(QUERY_STRING_PARAMETERS.to_string(), parameters.to_vec().into());
    attributes.insert(COMPRESSION_ENABLED.to_string(), true.into());
    attributes
}

/// Parse encoder output for structural assertions
pub fn json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("encoder output is JSON")
}
