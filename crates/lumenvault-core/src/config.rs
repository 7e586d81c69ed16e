//! Configuration for the LumenVault client

use serde::{Deserialize, Serialize};

use crate::types::{constants, ContractId, Network};

/// Process-wide network configuration. Loaded once at startup, shared by
/// reference, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Liquid-staking vault contract
    pub vault_contract: ContractId,

    /// Derivative (yield-bearing share) token contract
    pub share_token_contract: ContractId,

    /// Wrapped native asset contract
    pub native_token_contract: ContractId,

    /// Network the client is bound to
    pub network: Network,

    /// Ledger query endpoint (account snapshots: balances, sequence)
    pub horizon_url: String,

    /// Contract-execution RPC endpoint (simulate, submit, status)
    pub rpc_url: String,

    /// Display decimals of the native asset
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

fn default_decimals() -> u32 {
    constants::DECIMALS
}

impl NetworkConfig {
    /// Testnet deployment of the vault protocol
    pub fn testnet() -> Self {
        Self {
            vault_contract: ContractId::new(
                "CBT3MV2YU2FBQV7QNSAKGIWYRTQTKLCXBIZBKR2T3TRDWJKOCXQ53EFV",
            ),
            share_token_contract: ContractId::new(
                "CDTWBLUQAEXAQ6JWYZUS7ZTBFWCVBGZA5XYTTJ7C25QJX7PBTZNL6BDF",
            ),
            native_token_contract: ContractId::new(
                "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC",
            ),
            network: Network::Testnet,
            horizon_url: "https://horizon-testnet.stellar.org".to_string(),
            rpc_url: "https://soroban-testnet.stellar.org".to_string(),
            decimals: constants::DECIMALS,
        }
    }

    /// Passphrase that every envelope built by this client is bound to
    pub fn passphrase(&self) -> &'static str {
        self.network.passphrase()
    }
}
