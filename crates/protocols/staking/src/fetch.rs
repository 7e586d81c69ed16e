//! Protocol stats and balance fetching
//!
//! Read-only consumers of the vault and share-token view calls. Every
//! function here feeds passive display, so failures collapse into the
//! documented defaults rather than propagating.

use serde::{Deserialize, Serialize};

use lumenvault_core::{units, AccountId, NetworkConfig};
use lumenvault_tx::ScVal;
use soroban_client::{invoke_view, AccountProvider, SorobanRpc};

/// Vault-wide figures shown on the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolStats {
    /// XLM per 1 sXLM; defaults to 1.0 when the vault is unreachable
    pub exchange_rate: f64,
    /// Total value locked in XLM; defaults to 0.0
    pub total_assets_xlm: f64,
}

impl Default for ProtocolStats {
    fn default() -> Self {
        Self {
            exchange_rate: 1.0,
            total_assets_xlm: 0.0,
        }
    }
}

/// Current sXLM -> XLM exchange rate. Defaults to 1.0.
pub async fn fetch_exchange_rate(rpc: &dyn SorobanRpc, config: &NetworkConfig) -> f64 {
    invoke_view(
        rpc,
        config.network,
        &config.vault_contract,
        "get_exchange_rate",
        vec![],
    )
    .await
    .and_then(|v| decode_display(&v, config))
    .unwrap_or(1.0)
}

/// Total XLM held by the vault. Defaults to 0.0.
pub async fn fetch_total_assets(rpc: &dyn SorobanRpc, config: &NetworkConfig) -> f64 {
    invoke_view(
        rpc,
        config.network,
        &config.vault_contract,
        "get_total_assets",
        vec![],
    )
    .await
    .and_then(|v| decode_display(&v, config))
    .unwrap_or(0.0)
}

/// Circulating sXLM supply. Defaults to 0.0.
pub async fn fetch_total_supply(rpc: &dyn SorobanRpc, config: &NetworkConfig) -> f64 {
    invoke_view(
        rpc,
        config.network,
        &config.share_token_contract,
        "total_supply",
        vec![],
    )
    .await
    .and_then(|v| decode_display(&v, config))
    .unwrap_or(0.0)
}

/// sXLM balance of an account. Defaults to 0.0.
pub async fn fetch_share_balance(
    rpc: &dyn SorobanRpc,
    config: &NetworkConfig,
    address: &AccountId,
) -> f64 {
    invoke_view(
        rpc,
        config.network,
        &config.share_token_contract,
        "balance",
        vec![ScVal::address(address.as_str())],
    )
    .await
    .and_then(|v| decode_display(&v, config))
    .unwrap_or(0.0)
}

/// Native XLM balance from the ledger query endpoint. Defaults to 0.0.
pub async fn fetch_native_balance(accounts: &dyn AccountProvider, address: &AccountId) -> f64 {
    match accounts.load_account(address).await {
        Ok(snapshot) => units::stroops_to_xlm(snapshot.native_balance),
        Err(e) => {
            tracing::debug!(%address, error = %e, "native balance lookup failed");
            0.0
        }
    }
}

/// Both stats-panel view calls, each falling back to its own default
pub async fn fetch_protocol_stats(rpc: &dyn SorobanRpc, config: &NetworkConfig) -> ProtocolStats {
    ProtocolStats {
        exchange_rate: fetch_exchange_rate(rpc, config).await,
        total_assets_xlm: fetch_total_assets(rpc, config).await,
    }
}

fn decode_display(value: &ScVal, config: &NetworkConfig) -> Option<f64> {
    value
        .as_i128()
        .map(|v| units::to_display(v, config.decimals))
}
