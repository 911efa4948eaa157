//! # Command Surface & Serialized Execution
//!
//! The ledger's public contract as data: a [`Request`] names one operation
//! and its arguments, and [`TokenService::handle`] is the single message
//! handler that executes it for an already-authenticated caller identity.
//!
//! Execution model: mutations run under a write lock spanning the whole
//! state transition, so each one commits or aborts with exclusive access
//! to the full state -- no interleaving, no observable intermediate state.
//! Queries share a read lock and can run concurrently, but never see a
//! torn write.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::events::EventRecord;
use crate::identity::Address;
use crate::ledger::Ledger;
use crate::restriction::RestrictionCode;

// ---------------------------------------------------------------------------
// Requests & responses
// ---------------------------------------------------------------------------

/// One operation of the public contract, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    TransferOwnership { new_owner: Address },
    IsAdmin { account: Address },
    AddAdmin { account: Address },
    RemoveAdmin { account: Address },
    AddWhitelist { account: Address },
    IsWhitelist { account: Address },
    RemoveWhitelisted { account: Address },
    Pause,
    Unpause,
    Transfer { to: Address, value: u128 },
    Approve { spender: Address, value: u128 },
    TransferFrom { from: Address, to: Address, value: u128 },
    TotalSupply,
    BalanceOf { account: Address },
    Allowance { owner: Address, spender: Address },
    Burn { value: u128 },
    Mint { account: Address, value: u128 },
    ValidateTransferRestricted { to: Address },
    /// A bare value deposit with no operation selected. The ledger never
    /// accepts unsolicited inbound value, in any state.
    Deposit { value: u128 },
}

/// Result payload of a handled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    /// The mutation committed; there is nothing further to report.
    Ack,
    /// A boolean query result.
    Bool { value: bool },
    /// An amount query result.
    Amount { value: u128 },
    /// A restriction evaluation with its canonical message.
    Restriction {
        code: RestrictionCode,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// TokenService
// ---------------------------------------------------------------------------

/// Thread-safe handle on a ledger instance. Cheap to clone; all clones
/// share the same underlying state.
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<RwLock<Ledger>>,
}

impl TokenService {
    /// Wraps a ledger for shared access.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Executes one operation for `caller`.
    ///
    /// This is the single entry point external front-ends dispatch
    /// through. The caller identity is taken on trust -- authenticating it
    /// is the front-end's job.
    pub fn handle(&self, caller: Address, request: Request) -> Result<Response, TokenError> {
        tracing::debug!(caller = %caller, request = ?request, "handling request");

        match request {
            // Queries: shared read lock.
            Request::IsAdmin { account } => {
                let value = self.inner.read().is_admin(caller, account)?;
                Ok(Response::Bool { value })
            }
            Request::IsWhitelist { account } => Ok(Response::Bool {
                value: self.inner.read().is_whitelist(account),
            }),
            Request::TotalSupply => Ok(Response::Amount {
                value: self.inner.read().total_supply(),
            }),
            Request::BalanceOf { account } => Ok(Response::Amount {
                value: self.inner.read().balance_of(account),
            }),
            Request::Allowance { owner, spender } => Ok(Response::Amount {
                value: self.inner.read().allowance(owner, spender),
            }),
            Request::ValidateTransferRestricted { to } => {
                let code = self.inner.read().validate_transfer_restricted(to);
                Ok(Response::Restriction {
                    code,
                    message: code.message().to_string(),
                })
            }

            // Unsolicited inbound value: rejected before touching state.
            Request::Deposit { value } => Err(TokenError::InvalidArgument(format!(
                "direct deposits are not accepted (value {value})"
            ))),

            // Mutations: exclusive write lock for the whole transition.
            Request::TransferOwnership { new_owner } => {
                self.inner.write().transfer_ownership(caller, new_owner)?;
                Ok(Response::Ack)
            }
            Request::AddAdmin { account } => {
                self.inner.write().add_admin(caller, account)?;
                Ok(Response::Ack)
            }
            Request::RemoveAdmin { account } => {
                self.inner.write().remove_admin(caller, account)?;
                Ok(Response::Ack)
            }
            Request::AddWhitelist { account } => {
                self.inner.write().add_whitelist(caller, account)?;
                Ok(Response::Ack)
            }
            Request::RemoveWhitelisted { account } => {
                self.inner.write().remove_whitelisted(caller, account)?;
                Ok(Response::Ack)
            }
            Request::Pause => {
                self.inner.write().pause(caller)?;
                Ok(Response::Ack)
            }
            Request::Unpause => {
                self.inner.write().unpause(caller)?;
                Ok(Response::Ack)
            }
            Request::Transfer { to, value } => {
                self.inner.write().transfer(caller, to, value)?;
                Ok(Response::Ack)
            }
            Request::Approve { spender, value } => {
                self.inner.write().approve(caller, spender, value)?;
                Ok(Response::Ack)
            }
            Request::TransferFrom { from, to, value } => {
                self.inner.write().transfer_from(caller, from, to, value)?;
                Ok(Response::Ack)
            }
            Request::Burn { value } => {
                self.inner.write().burn(caller, value)?;
                Ok(Response::Ack)
            }
            Request::Mint { account, value } => {
                self.inner.write().mint(caller, account, value)?;
                Ok(Response::Ack)
            }
        }
    }

    /// Committed events with `seq >= since`, cloned out of the log so the
    /// read lock is not held while the caller streams them.
    pub fn events_since(&self, since: u64) -> Vec<EventRecord> {
        self.inner.read().events().since(since).to_vec()
    }

    /// Runs `f` against a read-locked view of the ledger. For composite
    /// reads (status pages, snapshots) that need a consistent view across
    /// several accessors.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenesisConfig;
    use crate::identity::ADDRESS_LEN;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; ADDRESS_LEN])
    }

    const ALICE: u8 = 0x0A;
    const BOB: u8 = 0x0B;

    fn service() -> TokenService {
        TokenService::new(Ledger::genesis(
            addr(ALICE),
            GenesisConfig {
                token_name: "FluwixToken".into(),
                token_symbol: "FWX".into(),
                decimals: 18,
                initial_account: addr(ALICE),
                initial_supply: 1_000_000,
            },
        ))
    }

    #[test]
    fn dispatches_queries_and_mutations() {
        let svc = service();

        svc.handle(
            addr(ALICE),
            Request::AddWhitelist {
                account: addr(BOB),
            },
        )
        .unwrap();
        svc.handle(
            addr(ALICE),
            Request::Transfer {
                to: addr(BOB),
                value: 250,
            },
        )
        .unwrap();

        assert_eq!(
            svc.handle(
                addr(BOB),
                Request::BalanceOf {
                    account: addr(BOB)
                }
            ),
            Ok(Response::Amount { value: 250 })
        );
        assert_eq!(
            svc.handle(addr(ALICE), Request::TotalSupply),
            Ok(Response::Amount { value: 1_000_000 })
        );
    }

    #[test]
    fn restriction_query_carries_message() {
        let svc = service();
        let response = svc
            .handle(
                addr(BOB),
                Request::ValidateTransferRestricted { to: addr(BOB) },
            )
            .unwrap();
        assert_eq!(
            response,
            Response::Restriction {
                code: RestrictionCode::NonWhitelisted,
                message: "ILLEGAL_TRANSFER_TO_NON_WHITELISTED_ADDRESS".to_string(),
            }
        );
    }

    #[test]
    fn deposit_always_rejected() {
        let svc = service();

        let err = svc
            .handle(addr(BOB), Request::Deposit { value: 5 })
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidArgument(_)));

        // Still rejected while paused, and for admins.
        svc.handle(addr(ALICE), Request::Pause).unwrap();
        assert!(svc
            .handle(addr(ALICE), Request::Deposit { value: 0 })
            .is_err());
    }

    #[test]
    fn errors_propagate_with_kind() {
        let svc = service();
        let err = svc
            .handle(addr(BOB), Request::Mint {
                account: addr(BOB),
                value: 1,
            })
            .unwrap_err();
        assert_eq!(err.kind(), "unauthorized");
    }

    #[test]
    fn request_serde_uses_op_tags() {
        let request: Request = serde_json::from_str(
            r#"{
                "op": "transfer",
                "to": "0x0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b",
                "value": 42
            }"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::Transfer {
                to: addr(BOB),
                value: 42,
            }
        );
    }

    #[test]
    fn concurrent_activity_preserves_the_supply_invariant() {
        let svc = service();
        // Alice is whitelisted from genesis; Bob needs an entry so value
        // can flow both ways.
        svc.handle(
            addr(ALICE),
            Request::AddWhitelist {
                account: addr(BOB),
            },
        )
        .unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let writer = svc.clone();
                scope.spawn(move || {
                    for _ in 0..200 {
                        let _ = writer.handle(
                            addr(ALICE),
                            Request::Transfer {
                                to: addr(BOB),
                                value: 1,
                            },
                        );
                        let _ = writer.handle(
                            addr(BOB),
                            Request::Transfer {
                                to: addr(ALICE),
                                value: 1,
                            },
                        );
                    }
                });
            }

            let reader = svc.clone();
            scope.spawn(move || {
                for _ in 0..500 {
                    reader.with_ledger(|lg| {
                        let held: u128 = lg.balances().map(|(_, balance)| balance).sum();
                        assert_eq!(held, lg.total_supply());
                    });
                }
            });
        });

        svc.with_ledger(|lg| {
            let held: u128 = lg.balances().map(|(_, balance)| balance).sum();
            assert_eq!(held, lg.total_supply());
            assert_eq!(lg.total_supply(), 1_000_000);
        });
    }
}
