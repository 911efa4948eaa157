//! # Genesis Configuration
//!
//! Construction-time parameters for a ledger instance. The node front-end
//! deserializes this from a JSON file; tests build it directly.

use serde::{Deserialize, Serialize};

use crate::identity::Address;

/// Display decimals used when none are configured. Raw amounts are never
/// divided by this -- it is pure front-end metadata.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Parameters that seed the genesis state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Human-readable token name (e.g., "FluwixToken").
    pub token_name: String,
    /// Ticker symbol (e.g., "FWX").
    pub token_symbol: String,
    /// Display decimal places.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// The pre-funded account. Seeded into the whitelist at genesis.
    pub initial_account: Address,
    /// Opening balance of `initial_account`, and the opening total supply.
    pub initial_supply: u128,
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

impl GenesisConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
