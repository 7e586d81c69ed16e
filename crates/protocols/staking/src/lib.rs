//! Liquid Staking Protocol Client
//!
//! This crate implements the client side of the lumenvault liquid-staking
//! protocol on Soroban.
//!
//! # Protocol Overview
//!
//! XLM deposited into the vault contract mints sXLM shares; the
//! XLM-per-sXLM exchange rate rises as staking rewards accrue, so shares
//! appreciate without rebasing:
//! - `deposit(from, amount)` locks XLM, mints sXLM at the current rate
//! - `withdraw(from, shares)` burns sXLM, releases the backing XLM
//!
//! # Features
//!
//! - Read-only vault state via free simulation probes
//! - Stake/unstake preview and local amount validation
//! - Full stake and unstake flows through an external signing wallet
//! - Background stats refresh with yield estimation
//!
//! # Example
//!
//! ```ignore
//! use staking::{StakingClient, connect};
//!
//! let caller = connect(&wallet, config.network).await?;
//! let client = StakingClient::new(&rpc, &horizon, &config);
//! let outcome = client.stake(&wallet, &caller, 25.0, &cancel).await?;
//! println!("staked, received {:?} sXLM", outcome.received);
//! ```

pub mod calculator;
pub mod fetch;
pub mod flow;
pub mod refresh;
pub mod wallet;

pub use calculator::*;
pub use fetch::{
    fetch_exchange_rate, fetch_native_balance, fetch_protocol_stats, fetch_share_balance,
    fetch_total_assets, fetch_total_supply, ProtocolStats,
};
pub use flow::{StakeOutcome, StakingClient};
pub use refresh::{spawn_stats_refresher, StatsSnapshot, STATS_REFRESH_INTERVAL};
pub use wallet::{connect, WalletConnector};

#[cfg(test)]
pub(crate) mod testutil;
