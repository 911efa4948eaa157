//! # Error Taxonomy
//!
//! Every fallible ledger operation returns a [`TokenError`]. A violation
//! aborts the whole operation before any state is touched -- there is no
//! partial mutation to roll back and no automatic retry.

use thiserror::Error;

use crate::identity::Address;
use crate::pause::PauseState;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A role check failed: the caller does not hold the required role.
    #[error("unauthorized: caller {caller} lacks {required} privileges")]
    Unauthorized {
        /// The identity that attempted the operation.
        caller: Address,
        /// The role the operation requires (`"owner"` or `"admin"`).
        required: &'static str,
    },

    /// A malformed or inapplicable input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The source account does not hold enough tokens.
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Current balance of the debited account.
        available: u128,
        /// Amount the caller tried to move.
        requested: u128,
    },

    /// The spender's allowance does not cover the requested amount.
    #[error("insufficient allowance: approved {approved}, requested {requested}")]
    InsufficientAllowance {
        /// Amount currently approved for the spender.
        approved: u128,
        /// Amount the spender tried to move.
        requested: u128,
    },

    /// The transfer-restriction check rejected the destination. Carries
    /// the canonical restriction message.
    #[error("transfer restricted: {message}")]
    NonWhitelisted {
        /// The mapped human-readable explanation.
        message: &'static str,
    },

    /// The operation requires a different pause state than the current one.
    #[error("invalid state: ledger is {current}, expected {expected}")]
    InvalidState {
        /// The ledger's current pause state.
        current: PauseState,
        /// The state the operation requires.
        expected: PauseState,
    },

    /// A checked addition would exceed the amount range.
    #[error("arithmetic overflow: {current} + {delta} exceeds the amount range")]
    Overflow {
        /// Value before the failed addition.
        current: u128,
        /// Amount that caused the overflow.
        delta: u128,
    },

    /// A checked subtraction would go below zero.
    #[error("arithmetic underflow: cannot subtract {delta} from {current}")]
    Underflow {
        /// Value before the failed subtraction.
        current: u128,
        /// Amount that caused the underflow.
        delta: u128,
    },
}

impl TokenError {
    /// Stable machine-readable tag for this error, used by front-ends to
    /// map errors without parsing display strings.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Unauthorized { .. } => "unauthorized",
            TokenError::InvalidArgument(_) => "invalid_argument",
            TokenError::InsufficientBalance { .. } => "insufficient_balance",
            TokenError::InsufficientAllowance { .. } => "insufficient_allowance",
            TokenError::NonWhitelisted { .. } => "non_whitelisted",
            TokenError::InvalidState { .. } => "invalid_state",
            TokenError::Overflow { .. } => "overflow",
            TokenError::Underflow { .. } => "underflow",
        }
    }
}
