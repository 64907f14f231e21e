//! Request and response header actions

use serde::{Deserialize, Serialize};

use super::enums::HeaderAction;
use super::ActionKind;

/// Wire parameters shared by request and response header actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeaderActionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_action: Option<HeaderAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

action_variant! {
    /// Modifies a header of the request sent to the origin
    RequestHeaderAction => ActionKind::RequestHeader, HeaderActionParameters
}

action_variant! {
    /// Modifies a header of the response sent to the client
    ResponseHeaderAction => ActionKind::ResponseHeader, HeaderActionParameters
}
