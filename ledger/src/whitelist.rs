//! # Transfer Whitelist
//!
//! The set of accounts eligible to *receive* transfers. Membership is
//! binary -- no counts, no ordering. Mutation is admin-gated through the
//! [`RoleRegistry`]; reads are unrestricted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TokenError;
use crate::identity::Address;
use crate::roles::RoleRegistry;

/// Allow-listed transfer destinations. Starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    members: HashSet<Address>,
}

impl Whitelist {
    /// Creates an empty whitelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unrestricted membership read.
    pub fn contains(&self, account: Address) -> bool {
        self.members.contains(&account)
    }

    /// Number of whitelisted accounts.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no account is whitelisted.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Adds `account` to the whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is an admin,
    /// and [`TokenError::InvalidArgument`] if `account` is already
    /// whitelisted.
    pub fn add(
        &mut self,
        roles: &RoleRegistry,
        caller: Address,
        account: Address,
    ) -> Result<(), TokenError> {
        roles.ensure_admin(caller)?;
        if self.members.contains(&account) {
            return Err(TokenError::InvalidArgument(format!(
                "{account} is already whitelisted"
            )));
        }
        self.members.insert(account);
        Ok(())
    }

    /// Removes `account` from the whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is an admin,
    /// and [`TokenError::InvalidArgument`] if `account` is not currently
    /// whitelisted.
    pub fn remove(
        &mut self,
        roles: &RoleRegistry,
        caller: Address,
        account: Address,
    ) -> Result<(), TokenError> {
        roles.ensure_admin(caller)?;
        if !self.members.contains(&account) {
            return Err(TokenError::InvalidArgument(format!(
                "{account} is not whitelisted"
            )));
        }
        self.members.remove(&account);
        Ok(())
    }

    /// Genesis-time seeding, before any caller exists to gate on.
    pub(crate) fn seed(&mut self, account: Address) {
        self.members.insert(account);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ADDRESS_LEN;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; ADDRESS_LEN])
    }

    fn roles() -> RoleRegistry {
        RoleRegistry::new(addr(1))
    }

    #[test]
    fn starts_empty() {
        let wl = Whitelist::new();
        assert!(wl.is_empty());
        assert!(!wl.contains(addr(2)));
    }

    #[test]
    fn admin_adds_and_removes() {
        let roles = roles();
        let mut wl = Whitelist::new();

        wl.add(&roles, addr(1), addr(2)).unwrap();
        assert!(wl.contains(addr(2)));
        assert_eq!(wl.len(), 1);

        wl.remove(&roles, addr(1), addr(2)).unwrap();
        assert!(!wl.contains(addr(2)));
    }

    #[test]
    fn non_admin_mutation_rejected() {
        let roles = roles();
        let mut wl = Whitelist::new();

        assert!(matches!(
            wl.add(&roles, addr(9), addr(2)),
            Err(TokenError::Unauthorized { .. })
        ));
        assert!(matches!(
            wl.remove(&roles, addr(9), addr(2)),
            Err(TokenError::Unauthorized { .. })
        ));
    }

    #[test]
    fn duplicate_add_rejected() {
        let roles = roles();
        let mut wl = Whitelist::new();
        wl.add(&roles, addr(1), addr(2)).unwrap();
        assert!(matches!(
            wl.add(&roles, addr(1), addr(2)),
            Err(TokenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn remove_requires_current_membership() {
        let roles = roles();
        let mut wl = Whitelist::new();
        // Unlike admin revocation, removal here demands the account IS
        // present.
        assert!(matches!(
            wl.remove(&roles, addr(1), addr(2)),
            Err(TokenError::InvalidArgument(_))
        ));
    }
}
