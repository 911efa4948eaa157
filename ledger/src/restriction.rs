//! # Transfer Restriction Codes
//!
//! Outcome of evaluating whether a destination account may receive a
//! transfer. The code-to-message mapping is part of the external contract:
//! front-ends match on the exact strings, so they must never change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of the transfer-eligibility check for a destination account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionCode {
    /// The destination is whitelisted; the transfer may proceed.
    Success,
    /// The destination is not on the whitelist.
    NonWhitelisted,
}

impl RestrictionCode {
    /// Returns the canonical human-readable message for this code.
    pub fn message(&self) -> &'static str {
        match self {
            RestrictionCode::Success => "SUCCESS",
            RestrictionCode::NonWhitelisted => "ILLEGAL_TRANSFER_TO_NON_WHITELISTED_ADDRESS",
        }
    }

    /// Returns `true` if the transfer is allowed to proceed.
    pub fn is_success(&self) -> bool {
        matches!(self, RestrictionCode::Success)
    }
}

impl fmt::Display for RestrictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_mapping_is_stable() {
        assert_eq!(RestrictionCode::Success.message(), "SUCCESS");
        assert_eq!(
            RestrictionCode::NonWhitelisted.message(),
            "ILLEGAL_TRANSFER_TO_NON_WHITELISTED_ADDRESS"
        );
    }

    #[test]
    fn only_success_passes() {
        assert!(RestrictionCode::Success.is_success());
        assert!(!RestrictionCode::NonWhitelisted.is_success());
    }
}
