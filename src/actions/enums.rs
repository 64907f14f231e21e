//! Enumerations shared by the wire parameters and the configuration blocks.
//!
//! Wire values and configuration values use the same PascalCase spelling, so
//! one `strum`/`serde` derive covers both directions.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, VariantNames};

/// What a header action does to the named header
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum HeaderAction {
    Append,
    Overwrite,
    Delete,
}

/// HTTP status family used by a URL redirect
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum RedirectType {
    Moved,
    Found,
    TemporaryRedirect,
    PermanentRedirect,
}

/// Protocol of the redirect destination
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum DestinationProtocol {
    MatchRequest,
    Http,
    Https,
}

/// Protocol used when forwarding to an overridden origin group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum ForwardingProtocol {
    HttpOnly,
    HttpsOnly,
    MatchRequest,
}

/// How the query string takes part in the cache key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum QueryStringCachingBehavior {
    IgnoreQueryString,
    UseQueryString,
    IgnoreSpecifiedQueryStrings,
    IncludeSpecifiedQueryStrings,
}

/// Cache expiry policy of a route override
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum CacheBehavior {
    HonorOrigin,
    OverrideAlways,
    OverrideIfOriginMissing,
}

/// Wire spelling of the compression flag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    AsRefStr, VariantNames, EnumIter,
)]
pub enum CompressionState {
    Enabled,
    Disabled,
}

impl From<bool> for CompressionState {
    fn from(enabled: bool) -> Self {
        if enabled {
            CompressionState::Enabled
        } else {
            CompressionState::Disabled
        }
    }
}

impl From<CompressionState> for bool {
    fn from(state: CompressionState) -> Self {
        state == CompressionState::Enabled
    }
}
