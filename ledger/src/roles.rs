//! # Role Registry
//!
//! Two-tier role hierarchy: a single *owner* who administers roles, and a
//! set of *admins* who hold privileged ledger rights (pause, mint, burn,
//! whitelist management). The owner is not implicitly an admin -- at
//! construction the initializing identity is seeded as both, but a later
//! owner gains no admin rights from the ownership transfer alone.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TokenError;
use crate::identity::Address;

/// Owner identity plus admin membership set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    owner: Address,
    admins: HashSet<Address>,
}

impl RoleRegistry {
    /// Creates the registry at genesis: `initializer` becomes owner and
    /// the first admin.
    pub fn new(initializer: Address) -> Self {
        let mut admins = HashSet::new();
        admins.insert(initializer);
        Self {
            owner: initializer,
            admins,
        }
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), TokenError> {
        if caller != self.owner {
            return Err(TokenError::Unauthorized {
                caller,
                required: "owner",
            });
        }
        Ok(())
    }

    /// Guard used by privileged ledger operations. Unlike [`is_admin`],
    /// this membership check is not restricted to the owner.
    ///
    /// [`is_admin`]: Self::is_admin
    pub fn ensure_admin(&self, caller: Address) -> Result<(), TokenError> {
        if !self.admins.contains(&caller) {
            return Err(TokenError::Unauthorized {
                caller,
                required: "admin",
            });
        }
        Ok(())
    }

    /// Hands ownership to `new_owner`.
    ///
    /// The admin set is untouched: the previous owner keeps whatever admin
    /// membership it had, and the new owner gains none.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is the owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.ensure_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }

    /// Queries admin membership. Only the owner may call this.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is the owner.
    pub fn is_admin(&self, caller: Address, account: Address) -> Result<bool, TokenError> {
        self.ensure_owner(caller)?;
        Ok(self.admins.contains(&account))
    }

    /// Grants admin rights to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is the owner,
    /// and [`TokenError::InvalidArgument`] if `account` is already an admin.
    pub fn add_admin(&mut self, caller: Address, account: Address) -> Result<(), TokenError> {
        self.ensure_owner(caller)?;
        if self.admins.contains(&account) {
            return Err(TokenError::InvalidArgument(format!(
                "{account} is already an admin"
            )));
        }
        self.admins.insert(account);
        Ok(())
    }

    /// Revokes admin rights from `account`.
    ///
    /// Carries the same not-already-admin precondition as [`add_admin`]:
    /// the call only completes for accounts that hold no admin membership,
    /// where clearing it is a no-op.
    ///
    /// [`add_admin`]: Self::add_admin
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is the owner,
    /// and [`TokenError::InvalidArgument`] if `account` is currently an
    /// admin.
    pub fn remove_admin(&mut self, caller: Address, account: Address) -> Result<(), TokenError> {
        self.ensure_owner(caller)?;
        if self.admins.contains(&account) {
            return Err(TokenError::InvalidArgument(format!(
                "{account} is already an admin"
            )));
        }
        self.admins.remove(&account);
        Ok(())
    }
}
