//! soroban-client: Network clients and transaction lifecycle
//!
//! This crate provides the two explicitly constructed network handles the
//! client depends on, the contract-execution RPC endpoint and the ledger
//! query endpoint, behind object-safe traits so every consumer (and every
//! test) can inject its own implementation. On top of them sit the
//! read-only view-call invoker and the build/simulate/finalize/submit
//! lifecycle.

pub mod lifecycle;
pub mod rpc_types;
pub mod view;

#[cfg(test)]
pub(crate) mod testutil;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use lumenvault_core::{units, AccountId, AccountSnapshot, RpcError, TxHash};
use lumenvault_tx::{ObservedStatus, TransactionEnvelope};

use rpc_types::{
    HashParams, RawGetTransactionResponse, RawSendResponse, RawSimulationResponse,
    TransactionParams,
};

pub use lifecycle::{
    build_invocation, finalize, submit_and_confirm, CancelHandle, Confirmation, PollPolicy,
};
pub use rpc_types::{SimulationOutcome, SimulationSuccess, SubmitAck};
pub use view::invoke_view;

/// Default timeout for endpoint calls (30 seconds).
/// Long enough for slow endpoints, short enough to avoid perpetual spinners.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// Contract-execution RPC endpoint: simulate, submit, poll status
#[async_trait]
pub trait SorobanRpc: Send + Sync {
    /// Dry-run an envelope against current ledger state. Computes resource
    /// costs and required authorizations without committing anything.
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationOutcome>;

    /// Hand a signed envelope to the network
    async fn send_transaction(&self, signed_envelope_b64: &str) -> Result<SubmitAck>;

    /// Query the ledger status of a submitted transaction by hash
    async fn get_transaction(&self, hash: &TxHash) -> Result<ObservedStatus>;
}

/// Ledger query endpoint: account snapshots (sequence, native balance)
#[async_trait]
pub trait AccountProvider: Send + Sync {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot>;
}

// =============================================================================
// JSON-RPC client
// =============================================================================

/// HTTP handle for the contract-execution RPC endpoint
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<R> {
    result: Option<R>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    message: String,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = timed_request(
            &self.url,
            self.http.post(&self.url).json(&request).send(),
        )
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::ApiError {
                message: format!("{} returned HTTP {}", method, status),
            });
        }

        let envelope: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| RpcError::ParseError(format!("{} response: {}", method, e)))?;

        if let Some(error) = envelope.error {
            return Err(RpcError::ApiError {
                message: format!("{}: {}", method, error.message),
            });
        }

        envelope
            .result
            .ok_or_else(|| RpcError::ParseError(format!("{} response missing result", method)))
    }
}

#[async_trait]
impl SorobanRpc for RpcClient {
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationOutcome> {
        let encoded = envelope.to_base64();
        let raw: RawSimulationResponse = self
            .call(
                "simulateTransaction",
                TransactionParams {
                    transaction: &encoded,
                },
            )
            .await?;
        raw.into_outcome()
    }

    async fn send_transaction(&self, signed_envelope_b64: &str) -> Result<SubmitAck> {
        let raw: RawSendResponse = self
            .call(
                "sendTransaction",
                TransactionParams {
                    transaction: signed_envelope_b64,
                },
            )
            .await?;
        raw.into_ack()
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<ObservedStatus> {
        let raw: RawGetTransactionResponse = self
            .call("getTransaction", HashParams { hash: hash.as_str() })
            .await?;
        raw.into_status()
    }
}

// =============================================================================
// Ledger query client
// =============================================================================

/// HTTP handle for the ledger query endpoint
#[derive(Debug, Clone)]
pub struct HorizonClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawAccountResponse {
    sequence: String,
    #[serde(default)]
    balances: Vec<RawBalance>,
}

#[derive(Debug, Deserialize)]
struct RawBalance {
    asset_type: String,
    balance: String,
}

impl HorizonClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AccountProvider for HorizonClient {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot> {
        let endpoint = format!("{}/accounts/{}", self.url, account);
        let response = timed_request(&endpoint, self.http.get(&endpoint).send()).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RpcError::AccountNotFound {
                address: account.to_string(),
            });
        }
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::ApiError {
                message: format!("account lookup returned HTTP {}", status),
            });
        }

        let raw: RawAccountResponse = response
            .json()
            .await
            .map_err(|e| RpcError::ParseError(format!("account response: {}", e)))?;

        let sequence = raw
            .sequence
            .parse::<i64>()
            .map_err(|e| RpcError::ParseError(format!("sequence {:?}: {}", raw.sequence, e)))?;

        // Balances arrive as decimals-aligned display strings
        let native_balance = raw
            .balances
            .iter()
            .find(|b| b.asset_type == "native")
            .and_then(|b| units::display_from_str(&b.balance))
            .map(units::xlm_to_stroops)
            .unwrap_or(0);

        Ok(AccountSnapshot {
            account_id: account.clone(),
            sequence,
            native_balance,
        })
    }
}

/// Wrap an endpoint call with the default timeout. Timeouts and transport
/// errors both surface as the endpoint being unreachable.
async fn timed_request<T>(
    url: &str,
    fut: impl std::future::Future<Output = std::result::Result<T, reqwest::Error>>,
) -> Result<T> {
    tokio::time::timeout(REQUEST_TIMEOUT, fut)
        .await
        .map_err(|_| RpcError::Unreachable {
            url: format!("{}: request timed out after {}s", url, REQUEST_TIMEOUT.as_secs()),
        })?
        .map_err(|e| RpcError::Unreachable {
            url: format!("{}: {}", url, e),
        })
}
