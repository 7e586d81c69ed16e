//! Wire DTOs for the contract-execution RPC endpoint
//!
//! Raw JSON-RPC payloads are deserialized into `Raw*` structs and then
//! converted into explicit tagged outcomes. Downstream code only ever
//! matches on the tagged forms; the duck-typed wire shapes stop here.

use serde::{Deserialize, Serialize};

use lumenvault_core::{RpcError, TxHash};
use lumenvault_tx::{AuthorizationEntry, ObservedStatus, ResourceData, ScVal};

/// Result of simulating a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutcome {
    Success(SimulationSuccess),
    /// The host rejected the invocation; carries the diagnostic payload.
    /// Terminal for the attempt: nothing downstream may sign or submit.
    Failure { diagnostic: String },
}

/// Everything the finalize step needs from a successful simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSuccess {
    /// Authorization entries to embed before signing (may be empty)
    pub auth: Vec<AuthorizationEntry>,
    /// Resource footprint annex, when the host reports one
    pub resource_data: Option<ResourceData>,
    /// Minimum resource fee in stroops; zero when the host reports none
    pub min_resource_fee: i128,
    /// Decoded return value, when the invocation produces one
    pub return_value: Option<ScVal>,
}

/// Immediate acknowledgment of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAck {
    /// Accepted into the queue; poll this hash for the terminal status
    Pending { hash: TxHash },
    /// Rejected at the gateway (bad sequence, underbid fee, ...)
    Rejected { diagnostic: String },
}

// =============================================================================
// Raw wire shapes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSimulationResponse {
    pub error: Option<String>,
    #[serde(default)]
    pub auth: Vec<String>,
    pub transaction_data: Option<String>,
    pub min_resource_fee: Option<String>,
    pub return_value: Option<ScVal>,
}

impl RawSimulationResponse {
    pub(crate) fn into_outcome(self) -> Result<SimulationOutcome, RpcError> {
        if let Some(diagnostic) = self.error {
            return Ok(SimulationOutcome::Failure { diagnostic });
        }

        let min_resource_fee = match self.min_resource_fee {
            Some(raw) => raw.parse::<i128>().map_err(|e| {
                RpcError::ParseError(format!("minResourceFee {:?}: {}", raw, e))
            })?,
            None => 0,
        };

        Ok(SimulationOutcome::Success(SimulationSuccess {
            auth: self.auth.into_iter().map(AuthorizationEntry::new).collect(),
            resource_data: self.transaction_data.map(ResourceData::new),
            min_resource_fee,
            return_value: self.return_value,
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSendResponse {
    pub status: String,
    pub hash: Option<String>,
    pub error_result: Option<String>,
}

impl RawSendResponse {
    pub(crate) fn into_ack(self) -> Result<SubmitAck, RpcError> {
        if self.status == "ERROR" {
            return Ok(SubmitAck::Rejected {
                diagnostic: self
                    .error_result
                    .unwrap_or_else(|| "submission rejected".to_string()),
            });
        }

        let hash = TxHash::new(self.hash.ok_or_else(|| {
            RpcError::ParseError("send response missing transaction hash".to_string())
        })?);
        if !hash.is_well_formed() {
            return Err(RpcError::ParseError(format!(
                "malformed transaction hash {:?}",
                hash.as_str()
            )));
        }

        Ok(SubmitAck::Pending { hash })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawGetTransactionResponse {
    pub status: String,
    pub return_value: Option<ScVal>,
    pub diagnostic: Option<String>,
}

impl RawGetTransactionResponse {
    pub(crate) fn into_status(self) -> Result<ObservedStatus, RpcError> {
        match self.status.as_str() {
            "SUCCESS" => Ok(ObservedStatus::Success {
                return_value: self.return_value,
            }),
            "FAILED" => Ok(ObservedStatus::Failed {
                diagnostic: self
                    .diagnostic
                    .unwrap_or_else(|| "transaction failed on-chain".to_string()),
            }),
            // NOT_FOUND and any not-yet-terminal status keep the poller going
            "NOT_FOUND" | "PENDING" => Ok(ObservedStatus::NotFound),
            other => Err(RpcError::ParseError(format!(
                "unknown transaction status {:?}",
                other
            ))),
        }
    }
}

/// Request params for the three RPC methods
#[derive(Debug, Serialize)]
pub(crate) struct TransactionParams<'a> {
    pub transaction: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct HashParams<'a> {
    pub hash: &'a str,
}
