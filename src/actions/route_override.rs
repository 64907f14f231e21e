//! Route configuration override action
//!
//! Overrides the origin group and caching behaviour of the matched route. The
//! query parameter list travels on the wire as one comma-joined string; the
//! split/join lives in the transformer, this module only models the payload.

use serde::{Deserialize, Serialize};

use super::enums::{CacheBehavior, CompressionState, ForwardingProtocol, QueryStringCachingBehavior};
use super::ActionKind;

/// Wire parameters of a route configuration override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RouteConfigurationOverrideActionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_group_override: Option<OriginGroupOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_configuration: Option<CacheConfiguration>,
}

/// Origin group the route is redirected to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OriginGroupOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_group: Option<ResourceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_protocol: Option<ForwardingProtocol>,
}

/// Reference to another remote resource by ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Cache-behavior override parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CacheConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_caching_behavior: Option<QueryStringCachingBehavior>,
    /// Comma-joined query parameter names; absent means "no filter"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_compression_enabled: Option<CompressionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_behavior: Option<CacheBehavior>,
    /// Duration in `d.hh:mm:ss` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_duration: Option<String>,
}

action_variant! {
    /// Overrides origin group and cache settings for the matched route
    RouteConfigurationOverrideAction => ActionKind::RouteConfigurationOverride,
        RouteConfigurationOverrideActionParameters
}
