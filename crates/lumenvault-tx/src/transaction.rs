//! Transaction and envelope structures
//!
//! An unsigned transaction carries exactly one contract invocation. It is
//! built twice per user action: once as a simulation probe with a
//! placeholder fee, and once finalized with the simulation-derived
//! authorization entries, resource data, and adjusted fee.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use lumenvault_core::{AccountId, ContractId, Stroops, TxError};

use crate::scval::ScVal;

/// Simulation-derived authorization entry. Opaque to the client: produced
/// by the host-function simulation and embedded verbatim before signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationEntry(pub String);

impl AuthorizationEntry {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }
}

/// Simulation-derived resource footprint annex. Opaque metadata describing
/// the ledger resources the transaction will touch; required for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceData(pub String);

impl ResourceData {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }
}

/// Invocation of a named contract method with typed arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeOperation {
    pub contract: ContractId,
    pub method: String,
    pub args: Vec<ScVal>,
    /// Empty until the finalize step embeds the simulation output
    #[serde(default)]
    pub auth: Vec<AuthorizationEntry>,
}

impl InvokeOperation {
    pub fn new(contract: ContractId, method: impl Into<String>, args: Vec<ScVal>) -> Self {
        Self {
            contract,
            method: method.into(),
            args,
            auth: Vec::new(),
        }
    }

    /// Same invocation descriptor, annotated with authorization entries.
    /// Authorization is only computable after simulation, yet must be
    /// embedded before signing.
    pub fn with_auth(mut self, auth: Vec<AuthorizationEntry>) -> Self {
        self.auth = auth;
        self
    }
}

/// Unsigned transaction: one invoke operation against the source account's
/// sequence, with a fee bid and a validity timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub source: AccountId,
    /// Sequence number this transaction bids (account sequence + 1)
    pub sequence: i64,
    /// Total fee bid in stroops
    pub fee: Stroops,
    pub timeout_secs: u64,
    pub operation: InvokeOperation,
    /// Attached by the finalize step when simulation reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_data: Option<ResourceData>,
}

impl UnsignedTransaction {
    /// Wrap into an unsigned envelope bound to the given passphrase
    pub fn into_envelope(self, network_passphrase: impl Into<String>) -> TransactionEnvelope {
        TransactionEnvelope {
            tx: self,
            network_passphrase: network_passphrase.into(),
            signatures: Vec::new(),
        }
    }
}

/// Transaction envelope: the unit handed to the wallet for signing and to
/// the network for submission. Bound to a network passphrase so a signed
/// envelope cannot be replayed on another network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: UnsignedTransaction,
    pub network_passphrase: String,
    #[serde(default)]
    pub signatures: Vec<String>,
}

impl TransactionEnvelope {
    /// Encode for the wallet / submission boundary
    pub fn to_base64(&self) -> String {
        // Serialization of these plain data types cannot fail
        let json = serde_json::to_vec(self).expect("envelope serialization");
        BASE64.encode(json)
    }

    /// Decode an envelope and enforce the network binding. Rejecting a
    /// mismatched passphrase here, before submission, is the cross-network
    /// replay guard.
    pub fn from_base64(encoded: &str, expected_passphrase: &str) -> Result<Self, TxError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| TxError::MalformedEnvelope {
                message: format!("invalid base64: {}", e),
            })?;

        let envelope: TransactionEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| TxError::MalformedEnvelope {
                message: format!("invalid envelope payload: {}", e),
            })?;

        if envelope.network_passphrase != expected_passphrase {
            return Err(TxError::WrongNetwork {
                expected: expected_passphrase.to_string(),
                actual: envelope.network_passphrase,
            });
        }

        Ok(envelope)
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }
}
