//! Core type definitions for the LumenVault client

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soroban contract address (C... strkey)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(pub String);

impl ContractId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stellar account address (G... strkey)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction hash (32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the hash is 32 bytes of lowercase hex.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 64
            && !self.0.bytes().any(|b| b.is_ascii_uppercase())
            && hex::decode(&self.0).map(|b| b.len() == 32).unwrap_or(false)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Network passphrase used to bind transaction envelopes to a network.
    /// A signed envelope for one passphrase is invalid on every other network.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Mainnet => "Public Global Stellar Network ; September 2015",
            Self::Testnet => "Test SDF Network ; September 2015",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stroop amount (1 XLM = 10_000_000 stroops)
pub type Stroops = i128;

/// Account snapshot from the ledger query endpoint.
/// Fetched immediately before building a transaction; the sequence number
/// goes stale as soon as any other transaction from this account lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account_id: AccountId,
    /// Current sequence number; the next transaction must bid sequence + 1
    pub sequence: i64,
    /// Native asset balance in stroops
    pub native_balance: Stroops,
}

/// Constants
pub mod constants {
    use super::Stroops;

    /// 1 XLM in stroops
    pub const STROOPS_PER_XLM: Stroops = 10_000_000;

    /// Display decimals of the native asset
    pub const DECIMALS: u32 = 7;

    /// Nominal base fee for never-submitted view-call probes
    pub const BASE_FEE_STROOPS: Stroops = 100;

    /// Placeholder fee for the simulation probe. Large enough that the
    /// simulation-derived resource fee never exceeds what the probe bid.
    pub const PROBE_FEE_STROOPS: Stroops = 10_000_000;

    /// Validity timeout for view-call probes (never submitted)
    pub const VIEW_CALL_TIMEOUT_SECS: u64 = 30;

    /// Validity timeout for user transactions. Generous enough to cover
    /// simulation plus interactive signing in the wallet UI.
    pub const TX_TIMEOUT_SECS: u64 = 300;

    /// Minimum stake/unstake amount (0.1 XLM), mirrors the vault contract
    pub const MIN_AMOUNT_STROOPS: Stroops = 1_000_000;

    /// Zero-balance throwaway account used as the source of view-call
    /// probes. The probe is simulated but never submitted, so the account
    /// needs no funding and no state is ever mutated.
    pub const VIEW_SOURCE_ACCOUNT: &str =
        "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
}
