//! URL redirect and URL rewrite actions

use serde::{Deserialize, Serialize};

use super::enums::{DestinationProtocol, RedirectType};
use super::ActionKind;

/// Wire parameters of a URL redirect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UrlRedirectActionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<RedirectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_protocol: Option<DestinationProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_query_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fragment: Option<String>,
}

/// Wire parameters of a URL rewrite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UrlRewriteActionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_unmatched_path: Option<bool>,
}

action_variant! {
    /// Answers the request with a redirect to another URL
    UrlRedirectAction => ActionKind::UrlRedirect, UrlRedirectActionParameters
}

action_variant! {
    /// Rewrites the request path before it is forwarded to the origin
    UrlRewriteAction => ActionKind::UrlRewrite, UrlRewriteActionParameters
}
