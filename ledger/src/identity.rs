//! # Account Identities
//!
//! An [`Address`] is the opaque identifier for a ledger participant. It is
//! a fixed-width 20-byte value with a total ordering -- two addresses are
//! either byte-for-byte equal or distinct, never equal-but-different.
//!
//! How an address is bound to a real-world caller (key material, session
//! tokens, whatever the front-end uses) is outside the ledger. By the time
//! an `Address` reaches an operation it is treated as already
//! authenticated.
//!
//! There is deliberately no "null address" value. Where the ledger needs
//! to express "no sender" -- the mint notification -- it uses
//! `Option<Address>` instead, so a sentinel can never collide with a real
//! account.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Width of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced when parsing an address from its textual form.
#[derive(Debug, Error)]
pub enum AddressParseError {
    /// The hex body has the wrong number of digits.
    #[error("invalid address length: expected {expected} hex digits, got {got}")]
    InvalidLength {
        /// Number of hex digits required.
        expected: usize,
        /// Number of hex digits found.
        got: usize,
    },

    /// The string contains non-hex characters.
    #[error("invalid hex digits: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A ledger account identity.
///
/// Displayed as `0x` followed by 40 lowercase hex digits. Serialized as
/// that string in human-readable formats and as raw bytes otherwise.
///
/// # Examples
///
/// ```
/// use fluwix_ledger::identity::Address;
///
/// let addr: Address = "0x00112233445566778899aabbccddeeff00112233"
///     .parse()
///     .unwrap();
/// assert_eq!(addr.to_hex(), "0x00112233445566778899aabbccddeeff00112233");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns the `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses an address from hex. The `0x` prefix is optional.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 2 * ADDRESS_LEN {
            return Err(AddressParseError::InvalidLength {
                expected: 2 * ADDRESS_LEN,
                got: digits.len(),
            });
        }
        let bytes = hex::decode(digits)?;
        let mut buf = [0u8; ADDRESS_LEN];
        buf.copy_from_slice(&bytes);
        Ok(Self(buf))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            if bytes.len() != ADDRESS_LEN {
                return Err(serde::de::Error::custom(format!(
                    "expected {}-byte address, got {}",
                    ADDRESS_LEN,
                    bytes.len()
                )));
            }
            let mut buf = [0u8; ADDRESS_LEN];
            buf.copy_from_slice(&bytes);
            Ok(Address(buf))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; ADDRESS_LEN])
    }

    #[test]
    fn hex_roundtrip() {
        let a = addr(0xAB);
        let recovered = Address::from_hex(&a.to_hex()).unwrap();
        assert_eq!(a, recovered);
    }

    #[test]
    fn parse_accepts_bare_hex() {
        let a = Address::from_hex("00112233445566778899aabbccddeeff00112233").unwrap();
        assert_eq!(a.to_hex(), "0x00112233445566778899aabbccddeeff00112233");
    }

    #[test]
    fn wrong_length_rejected() {
        let err = Address::from_hex("0xabcd").unwrap_err();
        assert!(matches!(err, AddressParseError::InvalidLength { got: 4, .. }));
    }

    #[test]
    fn non_hex_rejected() {
        let err = Address::from_hex("zz112233445566778899aabbccddeeff00112233").unwrap_err();
        assert!(matches!(err, AddressParseError::InvalidHex(_)));
    }

    #[test]
    fn ordering_is_total() {
        let low = addr(0x01);
        let high = addr(0x02);
        assert!(low < high);
        assert_eq!(low.cmp(&low), std::cmp::Ordering::Equal);
    }

    #[test]
    fn serde_json_roundtrip() {
        let a = addr(0x42);
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{}\"", a.to_hex()));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(a, recovered);
    }

    #[test]
    fn serde_rejects_malformed_string() {
        let result: Result<Address, _> = serde_json::from_str("\"0x123\"");
        assert!(result.is_err());
    }

    #[test]
    fn usable_as_json_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(addr(0x07), 99u128);
        let json = serde_json::to_string(&map).unwrap();
        let recovered: HashMap<Address, u128> = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.get(&addr(0x07)), Some(&99));
    }
}
