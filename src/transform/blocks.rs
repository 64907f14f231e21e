//! Typed configuration blocks and their field-for-field wire mappings.
//!
//! `read` turns a raw attribute map into a typed block (shape checks only;
//! cross-field rules live in [`super::rules`]), `to_parameters` builds the wire
//! payload and `flatten` goes back from a wire payload to attributes.

use crate::actions::{
    CacheBehavior, CacheConfiguration, DestinationProtocol, ForwardingProtocol, HeaderAction,
    HeaderActionParameters, OriginGroupOverride, QueryStringCachingBehavior, RedirectType,
    ResourceReference, RouteConfigurationOverrideActionParameters, UrlRedirectActionParameters,
    UrlRewriteActionParameters,
};
use crate::errors::Result;

use super::attributes::{AttributeMap, AttributeValue, BlockReader};
use super::delimited::{self, DELIMITER};

/// Attribute names
pub mod fields {
    pub const HEADER_ACTION: &str = "header_action";
    pub const HEADER_NAME: &str = "header_name";
    pub const VALUE: &str = "value";

    pub const REDIRECT_TYPE: &str = "redirect_type";
    pub const REDIRECT_PROTOCOL: &str = "redirect_protocol";
    pub const DESTINATION_PATH: &str = "destination_path";
    pub const DESTINATION_HOSTNAME: &str = "destination_hostname";
    pub const QUERY_STRING: &str = "query_string";
    pub const DESTINATION_FRAGMENT: &str = "destination_fragment";

    pub const SOURCE_PATTERN: &str = "source_pattern";
    pub const DESTINATION: &str = "destination";
    pub const PRESERVE_UNMATCHED_PATH: &str = "preserve_unmatched_path";

    pub const ORIGIN_GROUP_ID: &str = "cdn_frontdoor_origin_group_id";
    pub const FORWARDING_PROTOCOL: &str = "forwarding_protocol";
    pub const QUERY_STRING_CACHING_BEHAVIOR: &str = "query_string_caching_behavior";
    pub const QUERY_STRING_PARAMETERS: &str = "query_string_parameters";
    pub const COMPRESSION_ENABLED: &str = "compression_enabled";
    pub const CACHE_BEHAVIOR: &str = "cache_behavior";
    pub const CACHE_DURATION: &str = "cache_duration";
}

use fields::*;

/// A configuration block shape.
pub trait ConfigBlock: Sized {
    /// Every attribute the shape accepts
    const FIELDS: &'static [&'static str];

    fn read(reader: &BlockReader<'_>) -> Result<Self>;
}

fn attribute(field: &str, value: impl Into<AttributeValue>) -> (String, AttributeValue) {
    (field.to_string(), value.into())
}

fn enum_attribute<E: AsRef<str>>(field: &str, value: Option<E>) -> (String, AttributeValue) {
    let value: &str = value.as_ref().map_or("", |v| v.as_ref());
    attribute(field, value)
}

/// `request_header_action` / `response_header_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderActionBlock {
    pub header_action: HeaderAction,
    pub header_name: String,
    pub value: String,
}

impl ConfigBlock for HeaderActionBlock {
    const FIELDS: &'static [&'static str] = &[HEADER_ACTION, HEADER_NAME, VALUE];

    fn read(reader: &BlockReader<'_>) -> Result<Self> {
        Ok(Self {
            header_action: reader.required_enum(HEADER_ACTION)?,
            header_name: reader.required_string(HEADER_NAME)?,
            value: reader.string(VALUE)?,
        })
    }
}

impl HeaderActionBlock {
    pub fn to_parameters(&self) -> HeaderActionParameters {
        HeaderActionParameters {
            header_action: Some(self.header_action),
            header_name: Some(self.header_name.clone()),
            value: Some(self.value.clone()),
        }
    }

    pub fn flatten(parameters: &HeaderActionParameters) -> AttributeMap {
        AttributeMap::from([
            enum_attribute(HEADER_ACTION, parameters.header_action),
            attribute(HEADER_NAME, parameters.header_name.clone().unwrap_or_default()),
            attribute(VALUE, parameters.value.clone().unwrap_or_default()),
        ])
    }
}

/// `url_redirect_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRedirectBlock {
    pub redirect_type: Option<RedirectType>,
    pub redirect_protocol: Option<DestinationProtocol>,
    pub destination_path: String,
    pub destination_hostname: String,
    pub query_string: String,
    pub destination_fragment: String,
}

impl ConfigBlock for UrlRedirectBlock {
    const FIELDS: &'static [&'static str] = &[
        REDIRECT_TYPE,
        REDIRECT_PROTOCOL,
        DESTINATION_PATH,
        DESTINATION_HOSTNAME,
        QUERY_STRING,
        DESTINATION_FRAGMENT,
    ];

    fn read(reader: &BlockReader<'_>) -> Result<Self> {
        Ok(Self {
            redirect_type: reader.optional_enum(REDIRECT_TYPE)?,
            redirect_protocol: reader.optional_enum(REDIRECT_PROTOCOL)?,
            destination_path: reader.string(DESTINATION_PATH)?,
            destination_hostname: reader.string(DESTINATION_HOSTNAME)?,
            query_string: reader.string(QUERY_STRING)?,
            destination_fragment: reader.string(DESTINATION_FRAGMENT)?,
        })
    }
}

impl UrlRedirectBlock {
    pub fn to_parameters(&self) -> UrlRedirectActionParameters {
        UrlRedirectActionParameters {
            redirect_type: self.redirect_type,
            destination_protocol: self.redirect_protocol,
            custom_path: Some(self.destination_path.clone()),
            custom_hostname: Some(self.destination_hostname.clone()),
            custom_query_string: Some(self.query_string.clone()),
            custom_fragment: Some(self.destination_fragment.clone()),
        }
    }

    pub fn flatten(parameters: &UrlRedirectActionParameters) -> AttributeMap {
        AttributeMap::from([
            enum_attribute(REDIRECT_TYPE, parameters.redirect_type),
            enum_attribute(REDIRECT_PROTOCOL, parameters.destination_protocol),
            attribute(DESTINATION_PATH, parameters.custom_path.clone().unwrap_or_default()),
            attribute(DESTINATION_HOSTNAME, parameters.custom_hostname.clone().unwrap_or_default()),
            attribute(QUERY_STRING, parameters.custom_query_string.clone().unwrap_or_default()),
            attribute(DESTINATION_FRAGMENT, parameters.custom_fragment.clone().unwrap_or_default()),
        ])
    }
}

/// `url_rewrite_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRewriteBlock {
    pub source_pattern: String,
    pub destination: String,
    pub preserve_unmatched_path: bool,
}

impl ConfigBlock for UrlRewriteBlock {
    const FIELDS: &'static [&'static str] = &[SOURCE_PATTERN, DESTINATION, PRESERVE_UNMATCHED_PATH];

    fn read(reader: &BlockReader<'_>) -> Result<Self> {
        Ok(Self {
            source_pattern: reader.string(SOURCE_PATTERN)?,
            destination: reader.string(DESTINATION)?,
            preserve_unmatched_path: reader.bool(PRESERVE_UNMATCHED_PATH)?,
        })
    }
}

impl UrlRewriteBlock {
    pub fn to_parameters(&self) -> UrlRewriteActionParameters {
        UrlRewriteActionParameters {
            source_pattern: Some(self.source_pattern.clone()),
            destination: Some(self.destination.clone()),
            preserve_unmatched_path: Some(self.preserve_unmatched_path),
        }
    }

    pub fn flatten(parameters: &UrlRewriteActionParameters) -> AttributeMap {
        AttributeMap::from([
            attribute(SOURCE_PATTERN, parameters.source_pattern.clone().unwrap_or_default()),
            attribute(DESTINATION, parameters.destination.clone().unwrap_or_default()),
            attribute(PRESERVE_UNMATCHED_PATH, parameters.preserve_unmatched_path.unwrap_or(false)),
        ])
    }
}

/// `route_configuration_override_action`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfigurationOverrideBlock {
    pub origin_group_id: String,
    pub forwarding_protocol: Option<ForwardingProtocol>,
    pub query_string_caching_behavior: QueryStringCachingBehavior,
    pub query_string_parameters: Vec<String>,
    pub compression_enabled: bool,
    pub cache_behavior: Option<CacheBehavior>,
    pub cache_duration: String,
}

impl ConfigBlock for RouteConfigurationOverrideBlock {
    const FIELDS: &'static [&'static str] = &[
        ORIGIN_GROUP_ID,
        FORWARDING_PROTOCOL,
        QUERY_STRING_CACHING_BEHAVIOR,
        QUERY_STRING_PARAMETERS,
        COMPRESSION_ENABLED,
        CACHE_BEHAVIOR,
        CACHE_DURATION,
    ];

    fn read(reader: &BlockReader<'_>) -> Result<Self> {
        let query_string_parameters = reader.list(QUERY_STRING_PARAMETERS)?;

        // Names must survive the join/split cycle unchanged.
        for (position, name) in query_string_parameters.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(reader.error(
                    QUERY_STRING_PARAMETERS,
                    format!("{QUERY_STRING_PARAMETERS:?} entry {position} can not be empty"),
                ));
            }
            if name.contains(DELIMITER) || name.trim() != name {
                return Err(reader.error(
                    QUERY_STRING_PARAMETERS,
                    format!(
                        "{QUERY_STRING_PARAMETERS:?} entry {position} ({name:?}) must not contain \
                         {DELIMITER:?} or surrounding whitespace"
                    ),
                ));
            }
        }

        Ok(Self {
            origin_group_id: reader.string(ORIGIN_GROUP_ID)?,
            forwarding_protocol: reader.optional_enum(FORWARDING_PROTOCOL)?,
            query_string_caching_behavior: reader.required_enum(QUERY_STRING_CACHING_BEHAVIOR)?,
            query_string_parameters,
            compression_enabled: reader.bool(COMPRESSION_ENABLED)?,
            cache_behavior: reader.optional_enum(CACHE_BEHAVIOR)?,
            cache_duration: reader.string(CACHE_DURATION)?,
        })
    }
}

impl RouteConfigurationOverrideBlock {
    pub fn to_parameters(&self) -> RouteConfigurationOverrideActionParameters {
        let origin_group_override =
            if self.origin_group_id.is_empty() && self.forwarding_protocol.is_none() {
                None
            } else {
                Some(OriginGroupOverride {
                    origin_group: (!self.origin_group_id.is_empty()).then(|| ResourceReference {
                        id: Some(self.origin_group_id.clone()),
                    }),
                    forwarding_protocol: self.forwarding_protocol,
                })
            };

        RouteConfigurationOverrideActionParameters {
            origin_group_override,
            cache_configuration: Some(CacheConfiguration {
                query_string_caching_behavior: Some(self.query_string_caching_behavior),
                query_parameters: delimited::join(&self.query_string_parameters),
                is_compression_enabled: Some(self.compression_enabled.into()),
                cache_behavior: self.cache_behavior,
                cache_duration: Some(self.cache_duration.clone()),
            }),
        }
    }

    pub fn flatten(parameters: &RouteConfigurationOverrideActionParameters) -> AttributeMap {
        let origin = parameters.origin_group_override.as_ref();
        let origin_group_id = origin
            .and_then(|o| o.origin_group.as_ref())
            .and_then(|group| group.id.clone())
            .unwrap_or_default();

        let cache = parameters.cache_configuration.clone().unwrap_or_default();

        AttributeMap::from([
            attribute(ORIGIN_GROUP_ID, origin_group_id),
            enum_attribute(FORWARDING_PROTOCOL, origin.and_then(|o| o.forwarding_protocol)),
            enum_attribute(QUERY_STRING_CACHING_BEHAVIOR, cache.query_string_caching_behavior),
            attribute(
                QUERY_STRING_PARAMETERS,
                delimited::split(cache.query_parameters.as_deref()),
            ),
            attribute(
                COMPRESSION_ENABLED,
                cache.is_compression_enabled.map(bool::from).unwrap_or(false),
            ),
            enum_attribute(CACHE_BEHAVIOR, cache.cache_behavior),
            attribute(CACHE_DURATION, cache.cache_duration.unwrap_or_default()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionKind, CompressionState};

    fn read<B: ConfigBlock>(kind: ActionKind, attributes: &AttributeMap) -> Result<B> {
        let reader = BlockReader::new(kind, 0, attributes, B::FIELDS)?;
        B::read(&reader)
    }

    #[test]
    fn header_block_maps_every_field() {
        let attributes = AttributeMap::from([
            attribute(HEADER_ACTION, "Append"),
            attribute(HEADER_NAME, "x-cache"),
            attribute(VALUE, "HIT"),
        ]);

        let block: HeaderActionBlock = read(ActionKind::RequestHeader, &attributes).unwrap();
        assert_eq!(block.header_action, HeaderAction::Append);

        let params = block.to_parameters();
        assert_eq!(params.value.as_deref(), Some("HIT"));
        assert_eq!(HeaderActionBlock::flatten(&params), attributes);
    }

    #[test]
    fn header_block_requires_action_and_name() {
        let attributes = AttributeMap::from([attribute(HEADER_NAME, "x")]);
        assert!(read::<HeaderActionBlock>(ActionKind::RequestHeader, &attributes).is_err());

        let attributes = AttributeMap::from([attribute(HEADER_ACTION, "Delete")]);
        assert!(read::<HeaderActionBlock>(ActionKind::ResponseHeader, &attributes).is_err());
    }

    #[test]
    fn empty_header_parameters_flatten_to_empty_strings() {
        let flattened = HeaderActionBlock::flatten(&HeaderActionParameters::default());
        assert_eq!(flattened[HEADER_ACTION], AttributeValue::from(""));
        assert_eq!(flattened[HEADER_NAME], AttributeValue::from(""));
        assert_eq!(flattened[VALUE], AttributeValue::from(""));
    }

    #[test]
    fn redirect_defaults_are_empty_strings() {
        let block: UrlRedirectBlock =
            read(ActionKind::UrlRedirect, &AttributeMap::new()).unwrap();
        assert_eq!(block.redirect_type, None);
        assert_eq!(block.destination_path, "");

        let params = block.to_parameters();
        assert_eq!(params.redirect_type, None);
        assert_eq!(params.custom_path.as_deref(), Some(""));

        let flattened = UrlRedirectBlock::flatten(&UrlRedirectActionParameters::default());
        assert_eq!(flattened.len(), UrlRedirectBlock::FIELDS.len());
        assert!(flattened.values().all(|v| v == &AttributeValue::from("")));
    }

    #[test]
    fn rewrite_flatten_defaults_bool_to_false() {
        let flattened = UrlRewriteBlock::flatten(&UrlRewriteActionParameters::default());
        assert_eq!(flattened[PRESERVE_UNMATCHED_PATH], AttributeValue::Bool(false));
    }

    #[test]
    fn route_override_joins_query_parameters() {
        let attributes = AttributeMap::from([
            attribute(QUERY_STRING_CACHING_BEHAVIOR, "IncludeSpecifiedQueryStrings"),
            attribute(QUERY_STRING_PARAMETERS, vec!["lang", "region"]),
            attribute(COMPRESSION_ENABLED, true),
            attribute(CACHE_BEHAVIOR, "OverrideAlways"),
            attribute(CACHE_DURATION, "0.00:30:00"),
        ]);

        let block: RouteConfigurationOverrideBlock =
            read(ActionKind::RouteConfigurationOverride, &attributes).unwrap();
        let params = block.to_parameters();
        let cache = params.cache_configuration.as_ref().unwrap();

        assert_eq!(params.origin_group_override, None);
        assert_eq!(cache.query_parameters.as_deref(), Some("lang,region"));
        assert_eq!(cache.is_compression_enabled, Some(CompressionState::Enabled));
    }

    #[test]
    fn route_override_without_parameters_omits_wire_field() {
        let attributes = AttributeMap::from([
            attribute(QUERY_STRING_CACHING_BEHAVIOR, "UseQueryString"),
            attribute(QUERY_STRING_PARAMETERS, Vec::<String>::new()),
        ]);

        let block: RouteConfigurationOverrideBlock =
            read(ActionKind::RouteConfigurationOverride, &attributes).unwrap();
        let params = block.to_parameters();
        assert_eq!(params.cache_configuration.unwrap().query_parameters, None);
    }

    #[test]
    fn route_override_rejects_unsplittable_names() {
        for bad in [vec!["a,b"], vec![" a"], vec![""]] {
            let attributes = AttributeMap::from([
                attribute(QUERY_STRING_CACHING_BEHAVIOR, "IncludeSpecifiedQueryStrings"),
                attribute(QUERY_STRING_PARAMETERS, bad.clone()),
            ]);
            let err = read::<RouteConfigurationOverrideBlock>(
                ActionKind::RouteConfigurationOverride,
                &attributes,
            )
            .unwrap_err();
            assert_eq!(err.field(), Some(QUERY_STRING_PARAMETERS), "{bad:?}");
        }
    }

    #[test]
    fn route_override_origin_group_round_trips() {
        let attributes = AttributeMap::from([
            attribute(ORIGIN_GROUP_ID, "/profiles/p/originGroups/g"),
            attribute(FORWARDING_PROTOCOL, "HttpsOnly"),
            attribute(QUERY_STRING_CACHING_BEHAVIOR, "IgnoreQueryString"),
            attribute(QUERY_STRING_PARAMETERS, Vec::<String>::new()),
            attribute(COMPRESSION_ENABLED, false),
            attribute(CACHE_BEHAVIOR, "HonorOrigin"),
            attribute(CACHE_DURATION, "1.12:00:00"),
        ]);

        let block: RouteConfigurationOverrideBlock =
            read(ActionKind::RouteConfigurationOverride, &attributes).unwrap();
        let params = block.to_parameters();

        let origin = params.origin_group_override.as_ref().unwrap();
        assert_eq!(origin.forwarding_protocol, Some(ForwardingProtocol::HttpsOnly));
        assert_eq!(RouteConfigurationOverrideBlock::flatten(&params), attributes);
    }
}
