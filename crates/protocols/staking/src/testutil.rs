//! Scripted collaborators for protocol tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use lumenvault_core::{
    AccountId, AccountSnapshot, Network, ProtocolError, RpcError, Stroops, TxHash,
};
use lumenvault_tx::{ObservedStatus, ScVal, TransactionEnvelope};
use soroban_client::{
    AccountProvider, SimulationOutcome, SimulationSuccess, SorobanRpc, SubmitAck,
};

use crate::wallet::WalletConnector;

pub fn test_address() -> AccountId {
    AccountId::new("GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI")
}

pub fn test_hash() -> TxHash {
    TxHash::new("ab".repeat(32))
}

/// RPC double scripted per contract method.
///
/// View probes are answered out of `views` keyed by the invoked method
/// name; lifecycle simulations fall back to the `sims` queue. Every
/// simulated envelope is recorded in `simulated` so tests can inspect
/// what was actually sent to the network.
pub struct ScriptedRpc {
    views: Mutex<HashMap<String, VecDeque<ScVal>>>,
    sims: Mutex<VecDeque<SimulationOutcome>>,
    acks: Mutex<VecDeque<SubmitAck>>,
    statuses: Mutex<VecDeque<ObservedStatus>>,
    fail_message: Mutex<Option<String>>,
    pub simulated: Mutex<Vec<TransactionEnvelope>>,
    pub sent: Mutex<Vec<String>>,
    status_queries: Mutex<usize>,
}

impl ScriptedRpc {
    pub fn new() -> Self {
        Self {
            views: Mutex::new(HashMap::new()),
            sims: Mutex::new(VecDeque::new()),
            acks: Mutex::new(VecDeque::new()),
            statuses: Mutex::new(VecDeque::new()),
            fail_message: Mutex::new(None),
            simulated: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            status_queries: Mutex::new(0),
        }
    }

    /// Answer view probes of `method` with `value`. Repeats the last
    /// scripted value once the queue for that method runs dry.
    pub fn script_view(&self, method: &str, value: ScVal) {
        self.views
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(value);
    }

    pub fn push_simulation(&self, outcome: SimulationOutcome) {
        self.sims.lock().unwrap().push_back(outcome);
    }

    pub fn push_ack(&self, ack: SubmitAck) {
        self.acks.lock().unwrap().push_back(ack);
    }

    pub fn push_status(&self, status: ObservedStatus) {
        self.statuses.lock().unwrap().push_back(status);
    }

    /// Make every simulation fail with an API error carrying `message`
    pub fn fail_simulations(&self, message: impl Into<String>) {
        *self.fail_message.lock().unwrap() = Some(message.into());
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn status_query_count(&self) -> usize {
        *self.status_queries.lock().unwrap()
    }
}

#[async_trait]
impl SorobanRpc for ScriptedRpc {
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationOutcome, RpcError> {
        self.simulated.lock().unwrap().push(envelope.clone());

        if let Some(message) = self.fail_message.lock().unwrap().as_ref() {
            return Err(RpcError::ApiError {
                message: message.clone(),
            });
        }

        let method = envelope.tx.operation.method.clone();
        let mut views = self.views.lock().unwrap();
        if let Some(queue) = views.get_mut(&method) {
            let value = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(value) = value {
                return Ok(SimulationOutcome::Success(SimulationSuccess {
                    auth: Vec::new(),
                    resource_data: None,
                    min_resource_fee: 0,
                    return_value: Some(value),
                }));
            }
        }
        drop(views);

        match self.sims.lock().unwrap().pop_front() {
            Some(outcome) => Ok(outcome),
            None => Err(RpcError::ApiError {
                message: format!("no scripted simulation for {method}"),
            }),
        }
    }

    async fn send_transaction(&self, signed_envelope_b64: &str) -> Result<SubmitAck, RpcError> {
        self.sent
            .lock()
            .unwrap()
            .push(signed_envelope_b64.to_string());
        match self.acks.lock().unwrap().pop_front() {
            Some(ack) => Ok(ack),
            None => Ok(SubmitAck::Pending { hash: test_hash() }),
        }
    }

    async fn get_transaction(&self, _hash: &TxHash) -> Result<ObservedStatus, RpcError> {
        *self.status_queries.lock().unwrap() += 1;
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ObservedStatus::NotFound))
    }
}

/// Account provider with a fixed balance and a scripted sequence series
pub struct MockAccounts {
    sequences: Mutex<VecDeque<i64>>,
    pub native_balance: Stroops,
    lookups: Mutex<usize>,
}

impl MockAccounts {
    pub fn with_sequence_series(sequences: impl IntoIterator<Item = i64>) -> Self {
        Self {
            sequences: Mutex::new(sequences.into_iter().collect()),
            native_balance: 1_000_0000000,
            lookups: Mutex::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl AccountProvider for MockAccounts {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot, RpcError> {
        *self.lookups.lock().unwrap() += 1;
        let mut sequences = self.sequences.lock().unwrap();
        let sequence = if sequences.len() > 1 {
            sequences.pop_front().unwrap_or_default()
        } else {
            sequences.front().copied().unwrap_or_default()
        };
        Ok(AccountSnapshot {
            account_id: account.clone(),
            sequence,
            native_balance: self.native_balance,
        })
    }
}

/// Wallet double. Countersigns envelopes with its own passphrase, or
/// refuses when `cancel_signing` is set.
pub struct MockWallet {
    pub available: bool,
    pub permitted: bool,
    pub cancel_signing: bool,
    network: Network,
    address: AccountId,
    pub permission_requests: Mutex<u32>,
    pub signed: Mutex<Vec<String>>,
}

impl MockWallet {
    pub fn connected(network: Network) -> Self {
        Self {
            available: true,
            permitted: true,
            cancel_signing: false,
            network,
            address: test_address(),
            permission_requests: Mutex::new(0),
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn address(&self) -> AccountId {
        self.address.clone()
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn is_permitted(&self) -> bool {
        self.permitted
    }

    async fn request_permission(&self) -> Result<(), ProtocolError> {
        *self.permission_requests.lock().unwrap() += 1;
        Ok(())
    }

    async fn get_address(&self) -> Result<AccountId, ProtocolError> {
        Ok(self.address.clone())
    }

    async fn network_passphrase(&self) -> Result<String, ProtocolError> {
        Ok(self.network.passphrase().to_string())
    }

    async fn sign(&self, envelope_b64: &str, network_passphrase: &str) -> Option<String> {
        if self.cancel_signing {
            return None;
        }
        self.signed.lock().unwrap().push(envelope_b64.to_string());

        let mut envelope =
            TransactionEnvelope::from_base64(envelope_b64, network_passphrase).ok()?;
        envelope.signatures.push(format!(
            "sig-{}-{}",
            self.address.as_str(),
            envelope.tx.sequence
        ));
        Some(envelope.to_base64())
    }
}
