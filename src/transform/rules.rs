//! Cross-field validation rules.
//!
//! Every rule states that `field` must be set (or must not be set) while
//! `trigger` holds one of the listed enum values. All kinds share one table
//! and one validator.

use crate::actions::ActionKind;
use crate::errors::{Error, Result};

use super::attributes::AttributeMap;
use super::blocks::fields::{HEADER_ACTION, QUERY_STRING_CACHING_BEHAVIOR, QUERY_STRING_PARAMETERS, VALUE};

/// What a rule demands of its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Field must be non-empty
    Set,
    /// Field must be empty or absent
    Unset,
}

/// One row of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub trigger: &'static str,
    pub when: &'static [&'static str],
    pub requirement: Requirement,
}

const HEADER_RULES: &[FieldRule] = &[
    FieldRule {
        field: VALUE,
        trigger: HEADER_ACTION,
        when: &["Append", "Overwrite"],
        requirement: Requirement::Set,
    },
    FieldRule {
        field: VALUE,
        trigger: HEADER_ACTION,
        when: &["Delete"],
        requirement: Requirement::Unset,
    },
];

const ROUTE_CONFIGURATION_OVERRIDE_RULES: &[FieldRule] = &[
    FieldRule {
        field: QUERY_STRING_PARAMETERS,
        trigger: QUERY_STRING_CACHING_BEHAVIOR,
        when: &["IncludeSpecifiedQueryStrings", "IgnoreSpecifiedQueryStrings"],
        requirement: Requirement::Set,
    },
    FieldRule {
        field: QUERY_STRING_PARAMETERS,
        trigger: QUERY_STRING_CACHING_BEHAVIOR,
        when: &["UseQueryString", "IgnoreQueryString"],
        requirement: Requirement::Unset,
    },
];

/// Rules that apply to blocks of `kind`
pub fn rules_for(kind: ActionKind) -> &'static [FieldRule] {
    match kind {
        ActionKind::RequestHeader | ActionKind::ResponseHeader => HEADER_RULES,
        ActionKind::RouteConfigurationOverride => ROUTE_CONFIGURATION_OVERRIDE_RULES,
        ActionKind::UrlRedirect | ActionKind::UrlRewrite => &[],
    }
}

/// Check one block against every rule of its kind.
pub fn validate(kind: ActionKind, index: usize, attributes: &AttributeMap) -> Result<()> {
    for rule in rules_for(kind) {
        let Some(trigger_value) = attributes.get(rule.trigger).and_then(|v| v.as_str()) else {
            continue;
        };
        if !rule.when.contains(&trigger_value) {
            continue;
        }

        let is_set = attributes.get(rule.field).is_some_and(|v| v.is_set());
        let message = match (rule.requirement, is_set) {
            (Requirement::Set, false) => format!(
                "{:?} can not be empty if {:?} is set to {:?}",
                rule.field, rule.trigger, trigger_value
            ),
            (Requirement::Unset, true) => format!(
                "{:?} must be empty if {:?} is set to {:?}",
                rule.field, rule.trigger, trigger_value
            ),
            _ => continue,
        };

        return Err(Error::validation_rule(
            kind.config_name(),
            index,
            rule.field,
            rule.trigger,
            trigger_value,
            message,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{HeaderAction, QueryStringCachingBehavior};
    use crate::transform::attributes::AttributeValue;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn block(entries: &[(&str, AttributeValue)]) -> AttributeMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn table_values_parse_as_their_trigger_enum() {
        for rule in HEADER_RULES {
            for value in rule.when {
                assert!(HeaderAction::from_str(value).is_ok(), "{value}");
            }
        }
        for rule in ROUTE_CONFIGURATION_OVERRIDE_RULES {
            for value in rule.when {
                assert!(QueryStringCachingBehavior::from_str(value).is_ok(), "{value}");
            }
        }
    }

    #[test]
    fn every_trigger_value_is_covered_exactly_once() {
        for action in HeaderAction::iter() {
            let hits = HEADER_RULES.iter().filter(|r| r.when.contains(&action.as_ref())).count();
            assert_eq!(hits, 1, "{action}");
        }
        for behavior in QueryStringCachingBehavior::iter() {
            let hits = ROUTE_CONFIGURATION_OVERRIDE_RULES
                .iter()
                .filter(|r| r.when.contains(&behavior.as_ref()))
                .count();
            assert_eq!(hits, 1, "{behavior}");
        }
    }

    #[test]
    fn url_actions_have_no_rules() {
        assert!(rules_for(ActionKind::UrlRedirect).is_empty());
        assert!(rules_for(ActionKind::UrlRewrite).is_empty());
    }

    #[test]
    fn missing_value_for_append_names_both_fields() {
        let attributes = block(&[(HEADER_ACTION, "Append".into())]);
        let err = validate(ActionKind::RequestHeader, 3, &attributes).unwrap_err();

        match err {
            Error::Validation { block, index, field, related_field, value, .. } => {
                assert_eq!(block, "request_header_action");
                assert_eq!(index, 3);
                assert_eq!(field, VALUE);
                assert_eq!(related_field.as_deref(), Some(HEADER_ACTION));
                assert_eq!(value.as_deref(), Some("Append"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unset_requirement_reports_triggering_value() {
        let attributes = block(&[
            (QUERY_STRING_CACHING_BEHAVIOR, "UseQueryString".into()),
            (QUERY_STRING_PARAMETERS, vec!["a"].into()),
        ]);

        let err = validate(ActionKind::RouteConfigurationOverride, 0, &attributes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the \"route_configuration_override_action\" block at index 0 is not valid, \
             \"query_string_parameters\" must be empty if \
             \"query_string_caching_behavior\" is set to \"UseQueryString\""
        );
    }

    #[test]
    fn conforming_blocks_pass() {
        let delete = block(&[(HEADER_ACTION, "Delete".into()), (VALUE, "".into())]);
        assert!(validate(ActionKind::ResponseHeader, 0, &delete).is_ok());

        let include = block(&[
            (QUERY_STRING_CACHING_BEHAVIOR, "IncludeSpecifiedQueryStrings".into()),
            (QUERY_STRING_PARAMETERS, vec!["lang"].into()),
        ]);
        assert!(validate(ActionKind::RouteConfigurationOverride, 0, &include).is_ok());
    }
}
