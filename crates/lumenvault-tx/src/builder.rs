//! Unsigned transaction construction
//!
//! Pure building against an already-fetched account snapshot. Fetching the
//! snapshot (and keeping its staleness window small) is the caller's job;
//! see the lifecycle functions in soroban-client.

use lumenvault_core::{AccountId, AccountSnapshot, Stroops, TxError};

use crate::scval::ScVal;
use crate::transaction::{InvokeOperation, ResourceData, UnsignedTransaction};

/// Builder for a single-operation invoke transaction.
///
/// Exactly one operation per transaction; multi-operation batching is not
/// supported by this client.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: AccountId,
    sequence: i64,
    fee: Stroops,
    timeout_secs: u64,
    operation: Option<InvokeOperation>,
    resource_data: Option<ResourceData>,
}

impl TransactionBuilder {
    /// Start from an account snapshot; the transaction bids the snapshot's
    /// sequence + 1.
    pub fn new(account: &AccountSnapshot, fee: Stroops) -> Self {
        Self {
            source: account.account_id.clone(),
            sequence: account.sequence + 1,
            fee,
            timeout_secs: lumenvault_core::constants::TX_TIMEOUT_SECS,
            operation: None,
            resource_data: None,
        }
    }

    /// Start from a raw source/sequence pair (view-call probes use a dummy
    /// account at sequence 0).
    pub fn from_raw(source: AccountId, sequence: i64, fee: Stroops) -> Self {
        Self {
            source,
            sequence: sequence + 1,
            fee,
            timeout_secs: lumenvault_core::constants::TX_TIMEOUT_SECS,
            operation: None,
            resource_data: None,
        }
    }

    pub fn set_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the single invoke operation. Replaces any previously set one.
    pub fn operation(mut self, op: InvokeOperation) -> Self {
        self.operation = Some(op);
        self
    }

    /// Attach the simulation-derived resource footprint
    pub fn set_resource_data(mut self, data: ResourceData) -> Self {
        self.resource_data = Some(data);
        self
    }

    pub fn build(self) -> Result<UnsignedTransaction, TxError> {
        let operation = self.operation.ok_or_else(|| TxError::MalformedEnvelope {
            message: "transaction has no operation".to_string(),
        })?;

        Ok(UnsignedTransaction {
            source: self.source,
            sequence: self.sequence,
            fee: self.fee,
            timeout_secs: self.timeout_secs,
            operation,
            resource_data: self.resource_data,
        })
    }
}
