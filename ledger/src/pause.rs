//! # Pause Switch
//!
//! A global halt for economic activity. While paused, liveness-requiring
//! operations (transfers, minting, burning) are rejected; queries and
//! allowance approvals keep working. The switch cycles between exactly two
//! states and only admins may flip it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TokenError;
use crate::identity::Address;
use crate::roles::RoleRegistry;

/// The two states of the switch. Transitions are cyclic; neither state is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseState {
    /// Normal operation.
    Active,
    /// Economic activity halted.
    Paused,
}

impl fmt::Display for PauseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseState::Active => write!(f, "Active"),
            PauseState::Paused => write!(f, "Paused"),
        }
    }
}

/// The global halt flag. Starts [`PauseState::Active`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseSwitch {
    state: PauseState,
}

impl PauseSwitch {
    /// Creates the switch in its initial `Active` state.
    pub fn new() -> Self {
        Self {
            state: PauseState::Active,
        }
    }

    /// Current state.
    pub fn state(&self) -> PauseState {
        self.state
    }

    /// Returns `true` while halted.
    pub fn is_paused(&self) -> bool {
        self.state == PauseState::Paused
    }

    /// Guard for liveness-requiring operations.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidState`] while the ledger is paused.
    pub fn ensure_active(&self) -> Result<(), TokenError> {
        match self.state {
            PauseState::Active => Ok(()),
            PauseState::Paused => Err(TokenError::InvalidState {
                current: PauseState::Paused,
                expected: PauseState::Active,
            }),
        }
    }

    /// Halts economic activity.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is an admin,
    /// and [`TokenError::InvalidState`] if already paused.
    pub fn pause(&mut self, roles: &RoleRegistry, caller: Address) -> Result<(), TokenError> {
        roles.ensure_admin(caller)?;
        if self.state == PauseState::Paused {
            return Err(TokenError::InvalidState {
                current: PauseState::Paused,
                expected: PauseState::Active,
            });
        }
        self.state = PauseState::Paused;
        Ok(())
    }

    /// Resumes economic activity.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless `caller` is an admin,
    /// and [`TokenError::InvalidState`] if not currently paused.
    pub fn unpause(&mut self, roles: &RoleRegistry, caller: Address) -> Result<(), TokenError> {
        roles.ensure_admin(caller)?;
        if self.state == PauseState::Active {
            return Err(TokenError::InvalidState {
                current: PauseState::Active,
                expected: PauseState::Paused,
            });
        }
        self.state = PauseState::Active;
        Ok(())
    }
}

impl Default for PauseSwitch {
    fn default() -> Self {
        Self::new()
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
    fn starts_active() {
        let switch = PauseSwitch::new();
        assert_eq!(switch.state(), PauseState::Active);
        assert!(!switch.is_paused());
        assert!(switch.ensure_active().is_ok());
    }

    #[test]
    fn admin_can_cycle_states() {
        let roles = roles();
        let mut switch = PauseSwitch::new();

        switch.pause(&roles, addr(1)).unwrap();
        assert!(switch.is_paused());
        assert!(matches!(
            switch.ensure_active(),
            Err(TokenError::InvalidState { .. })
        ));

        switch.unpause(&roles, addr(1)).unwrap();
        assert_eq!(switch.state(), PauseState::Active);
    }

    #[test]
    fn non_admin_cannot_pause() {
        let roles = roles();
        let mut switch = PauseSwitch::new();
        let result = switch.pause(&roles, addr(9));
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert!(!switch.is_paused());
    }

    #[test]
    fn double_pause_rejected() {
        let roles = roles();
        let mut switch = PauseSwitch::new();
        switch.pause(&roles, addr(1)).unwrap();
        assert!(matches!(
            switch.pause(&roles, addr(1)),
            Err(TokenError::InvalidState { .. })
        ));
    }

    #[test]
    fn unpause_requires_paused() {
        let roles = roles();
        let mut switch = PauseSwitch::new();
        assert!(matches!(
            switch.unpause(&roles, addr(1)),
            Err(TokenError::InvalidState { .. })
        ));
    }
}
