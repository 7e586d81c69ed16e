//! Read-only view calls
//!
//! A view call builds a throwaway probe from a fixed zero-balance dummy
//! account and runs simulation only; nothing is ever submitted, so no
//! account state can be mutated. View calls feed passive display, so every
//! failure is swallowed into `None` and the caller picks the default.

use lumenvault_core::{constants, AccountId, ContractId, Network};
use lumenvault_tx::{InvokeOperation, ScVal, TransactionBuilder};

use crate::rpc_types::SimulationOutcome;
use crate::SorobanRpc;

/// Invoke a contract method read-only and decode its return value.
/// Returns `None` on any failure: transport error, simulation failure, or
/// an absent return value.
pub async fn invoke_view(
    rpc: &dyn SorobanRpc,
    network: Network,
    contract: &ContractId,
    method: &str,
    args: Vec<ScVal>,
) -> Option<ScVal> {
    let probe = TransactionBuilder::from_raw(
        AccountId::new(constants::VIEW_SOURCE_ACCOUNT),
        0,
        constants::BASE_FEE_STROOPS,
    )
    .set_timeout(constants::VIEW_CALL_TIMEOUT_SECS)
    .operation(InvokeOperation::new(contract.clone(), method, args))
    .build()
    .ok()?;

    let envelope = probe.into_envelope(network.passphrase());

    match rpc.simulate_transaction(&envelope).await {
        Ok(SimulationOutcome::Success(sim)) => {
            if sim.return_value.is_none() {
                tracing::debug!(method, "view call returned no value");
            }
            sim.return_value
        }
        Ok(SimulationOutcome::Failure { diagnostic }) => {
            tracing::debug!(method, %diagnostic, "view call simulation failed");
            None
        }
        Err(e) => {
            tracing::debug!(method, error = %e, "view call transport error");
            None
        }
    }
}
