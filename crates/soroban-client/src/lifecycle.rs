//! Transaction lifecycle: build, simulate-then-finalize, submit-and-confirm
//!
//! Turns a user intent into a confirmed on-chain operation:
//!
//! 1. build an unsigned probe against the caller's fresh account snapshot
//! 2. simulate it to obtain authorization entries and resource costs
//! 3. rebuild the operation with those entries and an adjusted fee
//! 4. (externally) have the wallet sign the finalized envelope
//! 5. submit and poll until a terminal ledger status
//!
//! Steps are strictly sequential: each step's input (fee, authorization,
//! sequence) depends on the prior step's output. No step retries on its
//! own; every retry is a fresh user-initiated action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lumenvault_core::{constants, AccountId, ContractId, Error, Network, TxError, TxHash};
use lumenvault_tx::{
    ConfirmationState, InvokeOperation, ScVal, TransactionBuilder, TransactionEnvelope,
    UnsignedTransaction,
};

use crate::rpc_types::{SimulationOutcome, SubmitAck};
use crate::{AccountProvider, SorobanRpc};

/// Polling discipline for the confirmation loop. Attempt-bounded, not
/// wall-clock-bounded: a slow individual status query can overrun the
/// nominal budget.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(1),
        }
    }
}

/// Cancellation token for an in-flight submit/poll cycle. Cloned handles
/// share the flag; cancelling makes the poller return `TxError::Cancelled`
/// at its next iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Confirmed result of a submitted transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub hash: TxHash,
    /// Decoded return value, when the invocation produced one
    pub return_value: Option<ScVal>,
}

/// Build the unsigned simulation probe for one contract invocation.
///
/// Fetches the caller's snapshot immediately before building to keep the
/// staleness window small; a sequence that goes stale anyway surfaces
/// later as `SubmitFailed` and is not retried here. The probe bids the
/// fixed placeholder fee; the real fee is corrected by [`finalize`].
pub async fn build_invocation(
    accounts: &dyn AccountProvider,
    caller: &AccountId,
    contract: ContractId,
    method: &str,
    args: Vec<ScVal>,
) -> Result<UnsignedTransaction, Error> {
    let snapshot = accounts.load_account(caller).await?;

    Ok(TransactionBuilder::new(&snapshot, constants::PROBE_FEE_STROOPS)
        .set_timeout(constants::TX_TIMEOUT_SECS)
        .operation(InvokeOperation::new(contract, method, args))
        .build()?)
}

/// Simulate the probe and produce the submission-ready unsigned transaction.
///
/// On simulation success the probe is rebuilt carrying the
/// simulation-derived authorization entries and resource footprint, with
/// total fee = probe fee + minimum resource fee, against a freshly fetched
/// account snapshot. On simulation failure nothing may be signed or
/// submitted. No signing key material ever touches this function.
pub async fn finalize(
    rpc: &dyn SorobanRpc,
    accounts: &dyn AccountProvider,
    network: Network,
    probe: UnsignedTransaction,
) -> Result<UnsignedTransaction, Error> {
    let source = probe.source.clone();
    let timeout_secs = probe.timeout_secs;
    let probe_fee = probe.fee;
    let operation = probe.operation.clone();

    let envelope = probe.into_envelope(network.passphrase());
    let sim = match rpc.simulate_transaction(&envelope).await? {
        SimulationOutcome::Success(sim) => sim,
        SimulationOutcome::Failure { diagnostic } => {
            return Err(TxError::SimulationFailed { diagnostic }.into());
        }
    };

    // The resource fee is only knowable after simulation; adding it on top
    // of the placeholder keeps the caller from having to guess it upfront.
    let final_fee = probe_fee + sim.min_resource_fee;

    // Fresh snapshot: the sequence may have advanced since the probe
    let fresh = accounts.load_account(&source).await?;

    let mut builder = TransactionBuilder::new(&fresh, final_fee)
        .set_timeout(timeout_secs)
        .operation(operation.with_auth(sim.auth));
    if let Some(data) = sim.resource_data {
        builder = builder.set_resource_data(data);
    }

    Ok(builder.build()?)
}

/// Submit a signed envelope and poll until a terminal ledger status.
///
/// The envelope is decoded against the configured network before
/// submission; a mismatched passphrase is rejected outright. A gateway
/// rejection fails with `SubmitFailed` and is never retried. Polling runs
/// at the policy's fixed interval (a cooperative wait; concurrent flows
/// are not blocked) until success, on-chain failure, cancellation, or an
/// exhausted attempt budget. Exhaustion is ambiguous: the transaction may
/// still land.
pub async fn submit_and_confirm(
    rpc: &dyn SorobanRpc,
    network: Network,
    signed_envelope_b64: &str,
    policy: &PollPolicy,
    cancel: &CancelHandle,
) -> Result<Confirmation, Error> {
    // Cross-network replay guard, checked before anything leaves this host
    let envelope = TransactionEnvelope::from_base64(signed_envelope_b64, network.passphrase())?;
    if !envelope.is_signed() {
        return Err(TxError::MalformedEnvelope {
            message: "envelope carries no signatures".to_string(),
        }
        .into());
    }

    let hash = match rpc.send_transaction(signed_envelope_b64).await? {
        SubmitAck::Pending { hash } => hash,
        SubmitAck::Rejected { diagnostic } => {
            return Err(TxError::SubmitFailed {
                message: diagnostic,
            }
            .into());
        }
    };

    tracing::debug!(%hash, "transaction accepted, polling for confirmation");

    let mut state = ConfirmationState::submitted(hash);
    loop {
        if cancel.is_cancelled() {
            return Err(TxError::Cancelled.into());
        }

        let status = rpc.get_transaction(state.hash()).await?;

        state = match state.observe(status, policy.max_attempts) {
            ConfirmationState::Confirmed { hash, return_value } => {
                return Ok(Confirmation { hash, return_value });
            }
            ConfirmationState::Failed { hash, diagnostic } => {
                tracing::warn!(%hash, %diagnostic, "transaction failed on-chain");
                return Err(TxError::OnChainFailure {
                    hash: hash.0,
                }
                .into());
            }
            ConfirmationState::TimedOut { hash, attempts } => {
                return Err(TxError::ConfirmationTimeout {
                    hash: hash.0,
                    attempts,
                }
                .into());
            }
            pending => {
                tokio::time::sleep(policy.interval).await;
                pending
            }
        };
    }
}
