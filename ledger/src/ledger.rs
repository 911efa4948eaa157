//! # The Ledger
//!
//! The aggregate state machine: balance and allowance bookkeeping, supply
//! tracking, and the gating pipeline every mutation flows through. The
//! order is fixed -- pause check, then role check, then whitelist check,
//! then the checked balance mutation, then event emission. A failed guard
//! aborts before any state is touched, so an operation either fully
//! commits or leaves the ledger exactly as it was.
//!
//! Invariant at every quiescent point: the sum of all balances equals the
//! total supply. Minting raises both together; burning lowers both
//! together; transfers move value without creating or destroying it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GenesisConfig;
use crate::error::TokenError;
use crate::events::{Event, EventLog};
use crate::identity::Address;
use crate::pause::{PauseState, PauseSwitch};
use crate::restriction::RestrictionCode;
use crate::roles::RoleRegistry;
use crate::whitelist::Whitelist;

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

fn checked_add(current: u128, delta: u128) -> Result<u128, TokenError> {
    current
        .checked_add(delta)
        .ok_or(TokenError::Overflow { current, delta })
}

fn checked_sub(current: u128, delta: u128) -> Result<u128, TokenError> {
    current
        .checked_sub(delta)
        .ok_or(TokenError::Underflow { current, delta })
}

// ---------------------------------------------------------------------------
// TokenInfo
// ---------------------------------------------------------------------------

/// Display metadata for the token. The ledger never interprets
/// `decimals`; it is carried for front-ends rendering raw amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimal places.
    pub decimals: u8,
    /// When this ledger instance was created.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The complete ledger state: one owned struct, passed by reference into
/// every operation. There is no ambient global -- callers decide where the
/// instance lives and how access is serialized (see
/// [`TokenService`](crate::service::TokenService)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    info: TokenInfo,
    roles: RoleRegistry,
    whitelist: Whitelist,
    pause: PauseSwitch,
    total_supply: u128,
    balances: HashMap<Address, u128>,
    allowances: HashMap<Address, HashMap<Address, u128>>,
    events: EventLog,
}

impl Ledger {
    /// Creates the genesis state.
    ///
    /// `initializer` becomes owner and the first admin. The configured
    /// initial account is whitelisted and pre-funded with the entire
    /// initial supply; every other balance starts at zero. Seeding emits
    /// no events -- the log records operations, not construction.
    pub fn genesis(initializer: Address, config: GenesisConfig) -> Self {
        let roles = RoleRegistry::new(initializer);
        let mut whitelist = Whitelist::new();
        whitelist.seed(config.initial_account);

        let mut balances = HashMap::new();
        balances.insert(config.initial_account, config.initial_supply);

        tracing::info!(
            token = %config.token_name,
            symbol = %config.token_symbol,
            owner = %initializer,
            initial_account = %config.initial_account,
            initial_supply = config.initial_supply,
            "ledger created at genesis"
        );

        Self {
            info: TokenInfo {
                name: config.token_name,
                symbol: config.token_symbol,
                decimals: config.decimals,
                created_at: Utc::now(),
            },
            roles,
            whitelist,
            pause: PauseSwitch::new(),
            total_supply: config.initial_supply,
            balances,
            allowances: HashMap::new(),
            events: EventLog::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Token display metadata.
    pub fn info(&self) -> &TokenInfo {
        &self.info
    }

    /// The current owner identity.
    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    /// Current pause state.
    pub fn pause_state(&self) -> PauseState {
        self.pause.state()
    }

    /// The committed event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Total tokens in circulation.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Balance of `account`; zero for accounts the ledger has never seen.
    pub fn balance_of(&self, account: Address) -> u128 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Amount `spender` may move on behalf of `owner`; zero by default.
    pub fn allowance(&self, owner: Address, spender: Address) -> u128 {
        self.allowances
            .get(&owner)
            .and_then(|per_spender| per_spender.get(&spender))
            .copied()
            .unwrap_or(0)
    }

    /// All non-zero holdings as `(account, balance)` pairs.
    pub fn balances(&self) -> impl Iterator<Item = (Address, u128)> + '_ {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(account, balance)| (*account, *balance))
    }

    /// Whether `account` may receive transfers.
    pub fn is_whitelist(&self, account: Address) -> bool {
        self.whitelist.contains(account)
    }

    /// Evaluates the transfer-restriction rule for a destination. Pure;
    /// never gated by pause state.
    pub fn validate_transfer_restricted(&self, to: Address) -> RestrictionCode {
        if self.whitelist.contains(to) {
            RestrictionCode::Success
        } else {
            RestrictionCode::NonWhitelisted
        }
    }

    fn ensure_unrestricted(&self, to: Address) -> Result<(), TokenError> {
        let code = self.validate_transfer_restricted(to);
        if code.is_success() {
            Ok(())
        } else {
            Err(TokenError::NonWhitelisted {
                message: code.message(),
            })
        }
    }

    // -----------------------------------------------------------------------
    // Role administration
    // -----------------------------------------------------------------------

    /// See [`RoleRegistry::transfer_ownership`].
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.roles.transfer_ownership(caller, new_owner)?;
        tracing::info!(from = %caller, to = %new_owner, "ownership transferred");
        Ok(())
    }

    /// See [`RoleRegistry::is_admin`].
    pub fn is_admin(&self, caller: Address, account: Address) -> Result<bool, TokenError> {
        self.roles.is_admin(caller, account)
    }

    /// See [`RoleRegistry::add_admin`].
    pub fn add_admin(&mut self, caller: Address, account: Address) -> Result<(), TokenError> {
        self.roles.add_admin(caller, account)?;
        tracing::info!(account = %account, "admin added");
        Ok(())
    }

    /// See [`RoleRegistry::remove_admin`].
    pub fn remove_admin(&mut self, caller: Address, account: Address) -> Result<(), TokenError> {
        self.roles.remove_admin(caller, account)
    }

    // -----------------------------------------------------------------------
    // Whitelist administration
    // -----------------------------------------------------------------------

    /// See [`Whitelist::add`].
    pub fn add_whitelist(&mut self, caller: Address, account: Address) -> Result<(), TokenError> {
        self.whitelist.add(&self.roles, caller, account)?;
        tracing::info!(account = %account, "account whitelisted");
        Ok(())
    }

    /// See [`Whitelist::remove`].
    pub fn remove_whitelisted(
        &mut self,
        caller: Address,
        account: Address,
    ) -> Result<(), TokenError> {
        self.whitelist.remove(&self.roles, caller, account)?;
        tracing::info!(account = %account, "account removed from whitelist");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Pause control
    // -----------------------------------------------------------------------

    /// Halts transfers, minting, and burning. Queries and approvals keep
    /// working.
    pub fn pause(&mut self, caller: Address) -> Result<(), TokenError> {
        self.pause.pause(&self.roles, caller)?;
        tracing::warn!(account = %caller, "ledger paused");
        self.events.emit(Event::Paused { account: caller });
        Ok(())
    }

    /// Resumes normal operation.
    pub fn unpause(&mut self, caller: Address) -> Result<(), TokenError> {
        self.pause.unpause(&self.roles, caller)?;
        tracing::warn!(account = %caller, "ledger unpaused");
        self.events.emit(Event::Unpaused { account: caller });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Value movement
    // -----------------------------------------------------------------------

    /// Moves `value` from the caller to `to`.
    ///
    /// The caller must retain a positive balance afterwards: a transfer of
    /// the caller's entire balance is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidState`] while paused,
    /// [`TokenError::NonWhitelisted`] when `to` is not an eligible
    /// destination, and [`TokenError::InsufficientBalance`] unless
    /// `balance(caller) > value`.
    pub fn transfer(&mut self, caller: Address, to: Address, value: u128) -> Result<(), TokenError> {
        self.pause.ensure_active()?;
        self.ensure_unrestricted(to)?;

        let from_balance = self.balance_of(caller);
        if from_balance <= value {
            return Err(TokenError::InsufficientBalance {
                available: from_balance,
                requested: value,
            });
        }

        let new_from = checked_sub(from_balance, value)?;
        // A self-transfer must net out to the starting balance.
        let to_balance = if to == caller {
            new_from
        } else {
            self.balance_of(to)
        };
        let new_to = checked_add(to_balance, value)?;

        self.balances.insert(caller, new_from);
        self.balances.insert(to, new_to);

        tracing::debug!(from = %caller, to = %to, value, "transfer");
        self.events.emit(Event::Transfer {
            from: Some(caller),
            to,
            value,
        });
        Ok(())
    }

    /// Sets the allowance of `spender` over the caller's tokens.
    ///
    /// Overwrites any previous allowance rather than adding to it.
    /// Deliberately available while paused, so holders can zero out
    /// approvals during an incident.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        value: u128,
    ) -> Result<(), TokenError> {
        self.allowances
            .entry(caller)
            .or_default()
            .insert(spender, value);

        tracing::debug!(owner = %caller, spender = %spender, value, "approval set");
        self.events.emit(Event::Approval {
            owner: caller,
            spender,
            value,
        });
        Ok(())
    }

    /// Moves `value` from `from` to `to` on the strength of an allowance
    /// previously granted to the caller.
    ///
    /// Both bounds are inclusive: a spend of exactly the remaining balance
    /// or exactly the remaining allowance succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidState`] while paused,
    /// [`TokenError::NonWhitelisted`] for an ineligible destination,
    /// [`TokenError::InsufficientBalance`] when `value > balance(from)`,
    /// and [`TokenError::InsufficientAllowance`] when
    /// `value > allowance(from, caller)`.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        value: u128,
    ) -> Result<(), TokenError> {
        self.pause.ensure_active()?;
        self.ensure_unrestricted(to)?;

        let from_balance = self.balance_of(from);
        if value > from_balance {
            return Err(TokenError::InsufficientBalance {
                available: from_balance,
                requested: value,
            });
        }
        let approved = self.allowance(from, caller);
        if value > approved {
            return Err(TokenError::InsufficientAllowance {
                approved,
                requested: value,
            });
        }

        let new_from = checked_sub(from_balance, value)?;
        let to_balance = if to == from {
            new_from
        } else {
            self.balance_of(to)
        };
        let new_to = checked_add(to_balance, value)?;
        let new_allowance = checked_sub(approved, value)?;

        self.balances.insert(from, new_from);
        self.balances.insert(to, new_to);
        self.allowances
            .entry(from)
            .or_default()
            .insert(caller, new_allowance);

        tracing::debug!(spender = %caller, from = %from, to = %to, value, "delegated transfer");
        self.events.emit(Event::Transfer {
            from: Some(from),
            to,
            value,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Supply control
    // -----------------------------------------------------------------------

    /// Destroys `value` tokens out of the caller's own balance, shrinking
    /// total supply by the same amount.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidState`] while paused,
    /// [`TokenError::Unauthorized`] unless the caller is an admin, and
    /// [`TokenError::InsufficientBalance`] when `value > balance(caller)`.
    pub fn burn(&mut self, caller: Address, value: u128) -> Result<(), TokenError> {
        self.pause.ensure_active()?;
        self.roles.ensure_admin(caller)?;

        let balance = self.balance_of(caller);
        if value > balance {
            return Err(TokenError::InsufficientBalance {
                available: balance,
                requested: value,
            });
        }

        let new_balance = checked_sub(balance, value)?;
        let new_supply = checked_sub(self.total_supply, value)?;

        self.balances.insert(caller, new_balance);
        self.total_supply = new_supply;

        tracing::info!(from = %caller, value, total_supply = new_supply, "burned");
        self.events.emit(Event::Burn {
            from: caller,
            value,
        });
        Ok(())
    }

    /// Creates `value` new tokens in `account`, growing total supply by
    /// the same amount.
    ///
    /// The emitted transfer notification has no sender -- the conventional
    /// mint signal.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidState`] while paused,
    /// [`TokenError::Unauthorized`] unless the caller is an admin, and
    /// [`TokenError::Overflow`] if supply or the target balance would
    /// exceed the amount range.
    pub fn mint(
        &mut self,
        caller: Address,
        account: Address,
        value: u128,
    ) -> Result<(), TokenError> {
        self.pause.ensure_active()?;
        self.roles.ensure_admin(caller)?;

        let new_supply = checked_add(self.total_supply, value)?;
        let new_balance = checked_add(self.balance_of(account), value)?;

        self.total_supply = new_supply;
        self.balances.insert(account, new_balance);

        tracing::info!(to = %account, value, total_supply = new_supply, "minted");
        self.events.emit(Event::Transfer {
            from: None,
            to: account,
            value,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
