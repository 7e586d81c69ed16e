//! Scripted test doubles for the network seams

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use lumenvault_core::{AccountId, AccountSnapshot, RpcError, TxHash};
use lumenvault_tx::{ObservedStatus, TransactionEnvelope};

use crate::rpc_types::{SimulationOutcome, SubmitAck};
use crate::{AccountProvider, Result, SorobanRpc};

/// Scripted RPC endpoint. Responses are popped in order; an exhausted
/// status queue keeps answering NOT_FOUND so timeout tests stay short to
/// script. Every call is recorded for assertions.
#[derive(Default)]
pub(crate) struct MockRpc {
    pub simulations: Mutex<VecDeque<Result<SimulationOutcome>>>,
    pub acks: Mutex<VecDeque<Result<SubmitAck>>>,
    pub statuses: Mutex<VecDeque<Result<ObservedStatus>>>,
    pub simulated: Mutex<Vec<TransactionEnvelope>>,
    pub sent: Mutex<Vec<String>>,
    pub status_queries: Mutex<Vec<TxHash>>,
}

impl MockRpc {
    pub fn with_simulation(outcome: SimulationOutcome) -> Self {
        let mock = Self::default();
        mock.simulations.lock().unwrap().push_back(Ok(outcome));
        mock
    }

    pub fn push_ack(&self, ack: SubmitAck) {
        self.acks.lock().unwrap().push_back(Ok(ack));
    }

    pub fn push_status(&self, status: ObservedStatus) {
        self.statuses.lock().unwrap().push_back(Ok(status));
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn status_query_count(&self) -> usize {
        self.status_queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SorobanRpc for MockRpc {
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationOutcome> {
        self.simulated.lock().unwrap().push(envelope.clone());
        self.simulations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(RpcError::ApiError {
                    message: "unscripted simulation".to_string(),
                })
            })
    }

    async fn send_transaction(&self, signed_envelope_b64: &str) -> Result<SubmitAck> {
        self.sent.lock().unwrap().push(signed_envelope_b64.to_string());
        self.acks.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(RpcError::ApiError {
                message: "unscripted send".to_string(),
            })
        })
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<ObservedStatus> {
        self.status_queries.lock().unwrap().push(hash.clone());
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ObservedStatus::NotFound))
    }
}

/// Scripted ledger query endpoint. Pops snapshots in order and records
/// every lookup; clones the last snapshot when the queue runs dry.
#[derive(Default)]
pub(crate) struct MockAccounts {
    pub snapshots: Mutex<VecDeque<AccountSnapshot>>,
    pub lookups: Mutex<Vec<AccountId>>,
    last: Mutex<Option<AccountSnapshot>>,
}

impl MockAccounts {
    pub fn with_sequence_series(account: &AccountId, sequences: &[i64]) -> Self {
        let mock = Self::default();
        {
            let mut queue = mock.snapshots.lock().unwrap();
            for seq in sequences {
                queue.push_back(AccountSnapshot {
                    account_id: account.clone(),
                    sequence: *seq,
                    native_balance: 1_000_000_000,
                });
            }
        }
        mock
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountProvider for MockAccounts {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot> {
        self.lookups.lock().unwrap().push(account.clone());
        let popped = self.snapshots.lock().unwrap().pop_front();
        match popped {
            Some(snapshot) => {
                *self.last.lock().unwrap() = Some(snapshot.clone());
                Ok(snapshot)
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| RpcError::AccountNotFound {
                    address: account.to_string(),
                }),
        }
    }
}

pub(crate) fn test_account() -> AccountId {
    AccountId::new("GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI")
}

pub(crate) fn test_hash() -> TxHash {
    TxHash::new("7e27e33ab4bbce355cbde6b4ed841b5bfcfb25b2a3fcd52c7ff0e7c4c1f5d8a9")
}
