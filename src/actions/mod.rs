//! Delivery-rule actions and their discriminated-union wire form.
//!
//! A delivery rule owns an ordered list of actions. On the wire each action is
//! an object of the shape
//!
//! ```json
//! { "name": "ModifyRequestHeader",
//!   "parameters": { "typeName": "DeliveryRuleHeaderActionParameters", ... } }
//! ```
//!
//! where `name` selects the variant and `parameters.typeName` is a fixed tag
//! required by the remote schema validator. Both are written by the codec and
//! never stored on the typed structs.
//!
//! # Available actions
//!
//! - **Request / response header**: append, overwrite or delete a header
//! - **URL redirect**: answer with a redirect
//! - **URL rewrite**: rewrite the forwarded path
//! - **Route configuration override**: origin group and cache overrides

/// Declare an action variant struct and its [`ActionVariant`] impl.
macro_rules! action_variant {
    ($(#[$meta:meta])* $name:ident => $kind:expr, $params:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize)]
        pub struct $name {
            pub parameters: $params,
            /// Base-shape fields carried through from the wire
            #[serde(skip)]
            pub base: $crate::wire::BaseFields,
        }

        impl $name {
            pub fn new(parameters: $params) -> Self {
                Self { parameters, base: $crate::wire::BaseFields::default() }
            }
        }

        impl $crate::actions::ActionVariant for $name {
            const KIND: $crate::actions::ActionKind = $kind;
            type Parameters = $params;

            fn from_parameters(parameters: $params) -> Self {
                Self::new(parameters)
            }

            fn base(&self) -> &$crate::wire::BaseFields {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::wire::BaseFields {
                &mut self.base
            }
        }
    };
}

pub mod enums;
pub mod header;
pub mod route_override;
pub mod url;

pub use enums::{
    CacheBehavior, CompressionState, DestinationProtocol, ForwardingProtocol, HeaderAction,
    QueryStringCachingBehavior, RedirectType,
};
pub use header::{HeaderActionParameters, RequestHeaderAction, ResponseHeaderAction};
pub use route_override::{
    CacheConfiguration, OriginGroupOverride, ResourceReference, RouteConfigurationOverrideAction,
    RouteConfigurationOverrideActionParameters,
};
pub use url::{UrlRedirectAction, UrlRedirectActionParameters, UrlRewriteAction, UrlRewriteActionParameters};

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;
use strum::{EnumIter, IntoEnumIterator};

use crate::errors::{Error, Result};
use crate::wire::{
    decode_field, inject_nested_tag, merge_base_fields, to_object, BaseFields, DiscriminatedUnion,
    Object,
};

/// Discriminator key of a delivery-rule action
pub const NAME_KEY: &str = "name";
/// Key holding the variant payload
pub const PARAMETERS_KEY: &str = "parameters";
/// Fixed type-name tag key inside the payload
pub const TYPE_NAME_KEY: &str = "typeName";

/// Top-level keys every action consumes itself; everything else is base shape.
const CONSUMED_KEYS: &[&str] = &[NAME_KEY, PARAMETERS_KEY];

/// The five supported action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ActionKind {
    RequestHeader,
    ResponseHeader,
    UrlRedirect,
    UrlRewrite,
    RouteConfigurationOverride,
}

impl ActionKind {
    /// Wire discriminator (`name`)
    pub const fn name(self) -> &'static str {
        match self {
            Self::RequestHeader => "ModifyRequestHeader",
            Self::ResponseHeader => "ModifyResponseHeader",
            Self::UrlRedirect => "UrlRedirect",
            Self::UrlRewrite => "UrlRewrite",
            Self::RouteConfigurationOverride => "RouteConfigurationOverride",
        }
    }

    /// Fixed `parameters.typeName` tag
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::RequestHeader | Self::ResponseHeader => "DeliveryRuleHeaderActionParameters",
            Self::UrlRedirect => "DeliveryRuleUrlRedirectActionParameters",
            Self::UrlRewrite => "DeliveryRuleUrlRewriteActionParameters",
            Self::RouteConfigurationOverride => {
                "DeliveryRuleRouteConfigurationOverrideActionParameters"
            }
        }
    }

    /// Name of the configuration block this kind is expanded from
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::RequestHeader => "request_header_action",
            Self::ResponseHeader => "response_header_action",
            Self::UrlRedirect => "url_redirect_action",
            Self::UrlRewrite => "url_rewrite_action",
            Self::RouteConfigurationOverride => "route_configuration_override_action",
        }
    }

    /// Name of the typed variant, used in diagnostics
    pub const fn variant_name(self) -> &'static str {
        match self {
            Self::RequestHeader => "DeliveryRuleRequestHeaderAction",
            Self::ResponseHeader => "DeliveryRuleResponseHeaderAction",
            Self::UrlRedirect => "UrlRedirectAction",
            Self::UrlRewrite => "UrlRewriteAction",
            Self::RouteConfigurationOverride => "DeliveryRuleRouteConfigurationOverrideAction",
        }
    }

    /// Look a kind up by its wire discriminator
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.name() == name)
    }

    /// Look a kind up by its configuration block name
    pub fn from_config_name(config_name: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.config_name() == config_name)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config_name())
    }
}

/// A concrete action struct: a parameters payload plus base-shape fields.
pub trait ActionVariant: Serialize + Sized {
    const KIND: ActionKind;
    type Parameters: DeserializeOwned;

    fn from_parameters(parameters: Self::Parameters) -> Self;
    fn base(&self) -> &BaseFields;
    fn base_mut(&mut self) -> &mut BaseFields;
}

/// First encoding pass for a single variant: struct → object, then tag the payload.
fn intermediate<A: ActionVariant>(action: &A) -> Result<Object> {
    let mut object = to_object(action, A::KIND.variant_name())?;
    inject_nested_tag(&mut object, PARAMETERS_KEY, TYPE_NAME_KEY, A::KIND.type_name())?;
    merge_base_fields(&mut object, action.base());
    Ok(object)
}

/// Decode the payload of a variant whose discriminator already matched.
///
/// The payload must carry only the variant's own fields; `typeName` is the
/// codec's tag and is checked, then removed, before the typed decode.
fn from_object<A: ActionVariant>(object: &Object) -> Result<A> {
    let target = A::KIND.variant_name();
    let mut payload: Object = decode_field(object, PARAMETERS_KEY, target)?;

    // A payload tagged for another shape would silently decode to defaults.
    if let Some(tag) = payload.remove(TYPE_NAME_KEY) {
        if tag != Value::String(A::KIND.type_name().to_string()) {
            return Err(Error::decode(
                target,
                PARAMETERS_KEY,
                serde_json::Error::custom(format!(
                    "unexpected {TYPE_NAME_KEY} {tag}, expected {:?}",
                    A::KIND.type_name()
                )),
            ));
        }
    }

    let parameters: A::Parameters = serde_json::from_value(Value::Object(payload))
        .map_err(|err| Error::decode(target, PARAMETERS_KEY, err))?;

    Ok(A::from_parameters(parameters))
}

/// One delivery-rule action
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryRuleAction {
    RequestHeader(RequestHeaderAction),
    ResponseHeader(ResponseHeaderAction),
    UrlRedirect(UrlRedirectAction),
    UrlRewrite(UrlRewriteAction),
    RouteConfigurationOverride(RouteConfigurationOverrideAction),
}

impl DeliveryRuleAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::RequestHeader(_) => ActionKind::RequestHeader,
            Self::ResponseHeader(_) => ActionKind::ResponseHeader,
            Self::UrlRedirect(_) => ActionKind::UrlRedirect,
            Self::UrlRewrite(_) => ActionKind::UrlRewrite,
            Self::RouteConfigurationOverride(_) => ActionKind::RouteConfigurationOverride,
        }
    }

    /// Base-shape fields carried by the action
    pub fn base(&self) -> &BaseFields {
        match self {
            Self::RequestHeader(a) => a.base(),
            Self::ResponseHeader(a) => a.base(),
            Self::UrlRedirect(a) => a.base(),
            Self::UrlRewrite(a) => a.base(),
            Self::RouteConfigurationOverride(a) => a.base(),
        }
    }

    fn base_mut(&mut self) -> &mut BaseFields {
        match self {
            Self::RequestHeader(a) => a.base_mut(),
            Self::ResponseHeader(a) => a.base_mut(),
            Self::UrlRedirect(a) => a.base_mut(),
            Self::UrlRewrite(a) => a.base_mut(),
            Self::RouteConfigurationOverride(a) => a.base_mut(),
        }
    }
}

impl DiscriminatedUnion for DeliveryRuleAction {
    const UNION: &'static str = "DeliveryRuleAction";
    const DISCRIMINATOR_KEY: &'static str = NAME_KEY;
    type Base = BaseFields;

    fn discriminator(&self) -> &'static str {
        self.kind().name()
    }

    fn to_intermediate(&self) -> Result<Object> {
        match self {
            Self::RequestHeader(a) => intermediate(a),
            Self::ResponseHeader(a) => intermediate(a),
            Self::UrlRedirect(a) => intermediate(a),
            Self::UrlRewrite(a) => intermediate(a),
            Self::RouteConfigurationOverride(a) => intermediate(a),
        }
    }

    fn dispatch(discriminator: &str, object: &Object) -> Result<Self> {
        let kind = ActionKind::from_name(discriminator).ok_or_else(|| {
            Error::unknown_discriminator(Self::UNION, Self::DISCRIMINATOR_KEY, discriminator)
        })?;

        match kind {
            ActionKind::RequestHeader => from_object(object).map(Self::RequestHeader),
            ActionKind::ResponseHeader => from_object(object).map(Self::ResponseHeader),
            ActionKind::UrlRedirect => from_object(object).map(Self::UrlRedirect),
            ActionKind::UrlRewrite => from_object(object).map(Self::UrlRewrite),
            ActionKind::RouteConfigurationOverride => {
                from_object(object).map(Self::RouteConfigurationOverride)
            }
        }
    }

    fn merge_base(&mut self, base: BaseFields) {
        *self.base_mut() = base.without(CONSUMED_KEYS);
    }
}

impl From<RequestHeaderAction> for DeliveryRuleAction {
    fn from(action: RequestHeaderAction) -> Self {
        Self::RequestHeader(action)
    }
}

impl From<ResponseHeaderAction> for DeliveryRuleAction {
    fn from(action: ResponseHeaderAction) -> Self {
        Self::ResponseHeader(action)
    }
}

impl From<UrlRedirectAction> for DeliveryRuleAction {
    fn from(action: UrlRedirectAction) -> Self {
        Self::UrlRedirect(action)
    }
}

impl From<UrlRewriteAction> for DeliveryRuleAction {
    fn from(action: UrlRewriteAction) -> Self {
        Self::UrlRewrite(action)
    }
}

impl From<RouteConfigurationOverrideAction> for DeliveryRuleAction {
    fn from(action: RouteConfigurationOverrideAction) -> Self {
        Self::RouteConfigurationOverride(action)
    }
}
