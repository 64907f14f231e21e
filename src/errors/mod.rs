//! # Error Handling
//!
//! Every failure in the codec and transformer is returned to the immediate
//! caller as a typed [`RuleActionError`]; nothing here retries or swallows.

pub mod types;

pub use types::{Result, RuleActionError};

/// Short alias used throughout the crate
pub type Error = RuleActionError;
