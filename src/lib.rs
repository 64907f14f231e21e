//! # Rule Actions
//!
//! Wire codec and configuration transformer for CDN delivery-rule actions.
//!
//! ## Architecture
//!
//! ```text
//! configuration blocks ──expand──▶ DeliveryRuleAction ──encode──▶ wire JSON
//!                      ◀─flatten──                    ◀─decode──
//! ```
//!
//! - **wire**: generic discriminated-union codec. The discriminator is always
//!   written on encode and selects the variant on decode.
//! - **actions**: the five action variants, their parameter payloads and
//!   the `DeliveryRuleAction` union.
//! - **transform**: block shape checks, cross-field rules and the
//!   field-for-field mapping between blocks and variants.
//!
//! ## Example Usage
//!
//! ```rust
//! use rule_actions::{
//!     decode, encode, expand, flatten, ActionKind, AttributeMap, AttributeValue, DeliveryRuleAction,
//! };
//!
//! let block = AttributeMap::from([
//!     ("header_action".to_string(), AttributeValue::from("Overwrite")),
//!     ("header_name".to_string(), AttributeValue::from("x-served-by")),
//!     ("value".to_string(), AttributeValue::from("edge")),
//! ]);
//!
//! let actions = expand(&[block.clone()], ActionKind::ResponseHeader)?;
//! let bytes = encode(&actions[0])?;
//! let decoded: DeliveryRuleAction = decode(&bytes)?;
//! assert_eq!(flatten(&[decoded]), vec![block]);
//! # Ok::<(), rule_actions::Error>(())
//! ```

pub mod actions;
pub mod config;
pub mod errors;
pub mod observability;
pub mod transform;
pub mod wire;

// Re-export commonly used types and functions
pub use actions::{ActionKind, DeliveryRuleAction};
pub use config::ObservabilityConfig;
pub use errors::{Error, Result};
pub use observability::init_logging;
pub use transform::{expand, flatten, AttributeMap, AttributeValue};
pub use wire::{decode, encode, DiscriminatedUnion};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
