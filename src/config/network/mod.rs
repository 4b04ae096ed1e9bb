use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::errors::WalletError;
use crate::globals::{USDC_BASE_ADDRESS, USDC_BSC_ADDRESS, USDT_ETHEREUM_ADDRESS};

/// Static description of one chain: its native asset, the node to talk to and
/// the single token contract tracked on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkProfile {
    pub native_symbol: String,
    pub native_name: String,
    #[serde(default = "default_native_decimals")]
    pub native_decimals: u8,
    pub rpc_url: String,
    pub token_contract: Address,
}

fn default_native_decimals() -> u8 {
    18
}

impl NetworkProfile {
    fn new(
        native_symbol: &str,
        native_name: &str,
        rpc_url: &str,
        token_contract: Address,
    ) -> NetworkProfile {
        NetworkProfile {
            native_symbol: native_symbol.to_string(),
            native_name: native_name.to_string(),
            native_decimals: default_native_decimals(),
            rpc_url: rpc_url.to_string(),
            token_contract,
        }
    }
}

/// Profiles keyed by lowercase network id, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTable {
    profiles: BTreeMap<String, NetworkProfile>,
}

impl NetworkTable {
    pub fn builtin() -> NetworkTable {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "eth".to_string(),
            NetworkProfile::new("ETH", "Ethereum", "https://eth.drpc.org", USDT_ETHEREUM_ADDRESS),
        );
        profiles.insert(
            "base".to_string(),
            NetworkProfile::new("ETH", "Base", "https://mainnet.base.org", USDC_BASE_ADDRESS),
        );
        profiles.insert(
            "bsc".to_string(),
            NetworkProfile::new(
                "BNB",
                "Binance Smart Chain",
                "https://bsc-rpc.publicnode.com",
                USDC_BSC_ADDRESS,
            ),
        );
        NetworkTable { profiles }
    }

    /// Adds new profiles and replaces built-in ones that share an id.
    pub fn merge(&mut self, overrides: BTreeMap<String, NetworkProfile>) {
        for (id, profile) in overrides {
            self.profiles.insert(id.to_lowercase(), profile);
        }
    }

    pub fn get(&self, id: &str) -> Result<&NetworkProfile, WalletError> {
        self.profiles
            .get(&id.to_lowercase())
            .ok_or_else(|| WalletError::UnknownNetwork(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NetworkProfile)> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_three_networks() {
        let table = NetworkTable::builtin();
        let ids: Vec<&str> = table.iter().map(|(id, _)| id.as_str()).collect();

        assert_eq!(ids, vec!["base", "bsc", "eth"]);
        assert_eq!(table.get("bsc").unwrap().native_symbol, "BNB");
        assert_eq!(table.get("ETH").unwrap().token_contract, USDT_ETHEREUM_ADDRESS);
    }

    #[test]
    fn unknown_network_is_reported() {
        let table = NetworkTable::builtin();
        assert!(matches!(
            table.get("solana"),
            Err(WalletError::UnknownNetwork(id)) if id == "solana"
        ));
    }

    #[test]
    fn merge_overrides_by_id_and_extends() {
        let mut table = NetworkTable::builtin();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "ETH".to_string(),
            NetworkProfile::new("ETH", "Ethereum", "http://localhost:8545", Address::ZERO),
        );
        overrides.insert(
            "arb".to_string(),
            NetworkProfile::new("ETH", "Arbitrum One", "https://arb1.arbitrum.io/rpc", Address::ZERO),
        );

        table.merge(overrides);

        assert_eq!(table.iter().count(), 4);
        assert_eq!(table.get("eth").unwrap().rpc_url, "http://localhost:8545");
        assert_eq!(table.get("arb").unwrap().native_name, "Arbitrum One");
    }
}
