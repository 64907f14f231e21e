//! # Action Transformer
//!
//! Converts between the flat configuration blocks of one action kind and typed
//! [`DeliveryRuleAction`] values.
//!
//! [`expand`] reads every block, checks its shape and cross-field rules, and
//! builds the matching variant; the first failing block aborts the whole call.
//! [`flatten`] is the inverse: it never fails and fills every attribute of the
//! block shape, using `""`, `false` or `[]` for fields the remote left out.

pub mod attributes;
pub mod blocks;
pub mod delimited;
pub mod rules;

pub use attributes::{AttributeMap, AttributeValue, BlockReader};
pub use blocks::{
    ConfigBlock, HeaderActionBlock, RouteConfigurationOverrideBlock, UrlRedirectBlock,
    UrlRewriteBlock,
};

use tracing::{debug, instrument};

use crate::actions::{
    ActionKind, DeliveryRuleAction, RequestHeaderAction, ResponseHeaderAction,
    RouteConfigurationOverrideAction, UrlRedirectAction, UrlRewriteAction,
};
use crate::errors::Result;

/// Expand configuration blocks of a single `kind` into typed actions, in order.
#[instrument(level = "debug", skip_all, fields(kind = %kind, blocks = blocks.len()))]
pub fn expand(blocks: &[AttributeMap], kind: ActionKind) -> Result<Vec<DeliveryRuleAction>> {
    let actions = blocks
        .iter()
        .enumerate()
        .map(|(index, attributes)| expand_block(kind, index, attributes))
        .collect::<Result<Vec<_>>>()?;

    debug!(actions = actions.len(), "expanded configuration blocks");
    Ok(actions)
}

/// Expand one block at position `index`.
pub fn expand_block(
    kind: ActionKind,
    index: usize,
    attributes: &AttributeMap,
) -> Result<DeliveryRuleAction> {
    let action = match kind {
        ActionKind::RequestHeader => {
            let block: HeaderActionBlock = read_block(kind, index, attributes)?;
            RequestHeaderAction::new(block.to_parameters()).into()
        }
        ActionKind::ResponseHeader => {
            let block: HeaderActionBlock = read_block(kind, index, attributes)?;
            ResponseHeaderAction::new(block.to_parameters()).into()
        }
        ActionKind::UrlRedirect => {
            let block: UrlRedirectBlock = read_block(kind, index, attributes)?;
            UrlRedirectAction::new(block.to_parameters()).into()
        }
        ActionKind::UrlRewrite => {
            let block: UrlRewriteBlock = read_block(kind, index, attributes)?;
            UrlRewriteAction::new(block.to_parameters()).into()
        }
        ActionKind::RouteConfigurationOverride => {
            let block: RouteConfigurationOverrideBlock = read_block(kind, index, attributes)?;
            RouteConfigurationOverrideAction::new(block.to_parameters()).into()
        }
    };

    Ok(action)
}

/// Shape checks, then cross-field rules.
fn read_block<B: ConfigBlock>(kind: ActionKind, index: usize, attributes: &AttributeMap) -> Result<B> {
    let reader = BlockReader::new(kind, index, attributes, B::FIELDS)?;
    let block = B::read(&reader)?;
    rules::validate(kind, index, attributes)?;
    Ok(block)
}

/// Flatten typed actions back into configuration blocks, preserving order.
pub fn flatten(actions: &[DeliveryRuleAction]) -> Vec<AttributeMap> {
    actions.iter().map(flatten_action).collect()
}

/// Flatten a single action into the block shape of its kind.
pub fn flatten_action(action: &DeliveryRuleAction) -> AttributeMap {
    match action {
        DeliveryRuleAction::RequestHeader(a) => HeaderActionBlock::flatten(&a.parameters),
        DeliveryRuleAction::ResponseHeader(a) => HeaderActionBlock::flatten(&a.parameters),
        DeliveryRuleAction::UrlRedirect(a) => UrlRedirectBlock::flatten(&a.parameters),
        DeliveryRuleAction::UrlRewrite(a) => UrlRewriteBlock::flatten(&a.parameters),
        DeliveryRuleAction::RouteConfigurationOverride(a) => {
            RouteConfigurationOverrideBlock::flatten(&a.parameters)
        }
    }
}
