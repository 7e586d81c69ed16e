//! Stake and unstake flows
//!
//! Each flow runs the full transaction lifecycle against the vault
//! contract: validate locally, build and simulate a probe, finalize with
//! the simulation-derived fee and authorization, hand the envelope to the
//! wallet for signing, then submit and poll to a terminal status. A
//! signing refusal aborts before anything reaches the network.

use serde::{Deserialize, Serialize};

use lumenvault_core::{units, AccountId, Error, NetworkConfig, TxError};
use lumenvault_tx::ScVal;
use soroban_client::{
    build_invocation, finalize, submit_and_confirm, AccountProvider, CancelHandle, PollPolicy,
    SorobanRpc,
};

use crate::calculator::{validate_stake_amount, validate_unstake_amount};
use crate::fetch::{fetch_native_balance, fetch_share_balance};
use crate::wallet::WalletConnector;

/// Result of a completed stake or unstake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeOutcome {
    pub hash: lumenvault_core::TxHash,
    /// Tokens received, decoded from the contract's return value when the
    /// ledger reported one
    pub received: Option<f64>,
}

pub struct StakingClient<'a> {
    rpc: &'a dyn SorobanRpc,
    accounts: &'a dyn AccountProvider,
    config: &'a NetworkConfig,
    poll: PollPolicy,
}

impl<'a> StakingClient<'a> {
    pub fn new(
        rpc: &'a dyn SorobanRpc,
        accounts: &'a dyn AccountProvider,
        config: &'a NetworkConfig,
    ) -> Self {
        Self {
            rpc,
            accounts,
            config,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Deposit XLM into the vault, receiving sXLM shares
    pub async fn stake(
        &self,
        wallet: &dyn WalletConnector,
        caller: &AccountId,
        amount_xlm: f64,
        cancel: &CancelHandle,
    ) -> Result<StakeOutcome, Error> {
        let balance = fetch_native_balance(self.accounts, caller).await;
        validate_stake_amount(amount_xlm, balance)?;

        self.invoke_vault(wallet, caller, "deposit", amount_xlm, cancel)
            .await
    }

    /// Burn sXLM shares, withdrawing the backing XLM
    pub async fn unstake(
        &self,
        wallet: &dyn WalletConnector,
        caller: &AccountId,
        amount_sxlm: f64,
        cancel: &CancelHandle,
    ) -> Result<StakeOutcome, Error> {
        let shares = fetch_share_balance(self.rpc, self.config, caller).await;
        validate_unstake_amount(amount_sxlm, shares)?;

        self.invoke_vault(wallet, caller, "withdraw", amount_sxlm, cancel)
            .await
    }

    async fn invoke_vault(
        &self,
        wallet: &dyn WalletConnector,
        caller: &AccountId,
        method: &str,
        display_amount: f64,
        cancel: &CancelHandle,
    ) -> Result<StakeOutcome, Error> {
        let amount = units::to_smallest_unit(display_amount, self.config.decimals);
        let args = vec![ScVal::address(caller.as_str()), ScVal::i128(amount)];

        tracing::info!(method, amount = %amount, "invoking vault");

        let probe = build_invocation(
            self.accounts,
            caller,
            self.config.vault_contract.clone(),
            method,
            args,
        )
        .await?;
        let unsigned = finalize(self.rpc, self.accounts, self.config.network, probe).await?;

        let envelope_b64 = unsigned
            .into_envelope(self.config.network.passphrase())
            .to_base64();
        let signed = wallet
            .sign(&envelope_b64, self.config.network.passphrase())
            .await
            .ok_or(TxError::SigningCancelled)?;

        let confirmation =
            submit_and_confirm(self.rpc, self.config.network, &signed, &self.poll, cancel).await?;

        let received = confirmation
            .return_value
            .as_ref()
            .and_then(ScVal::as_i128)
            .map(|raw| units::to_display(raw, self.config.decimals));

        tracing::info!(hash = %confirmation.hash, ?received, "vault invocation confirmed");

        Ok(StakeOutcome {
            hash: confirmation.hash,
            received,
        })
    }
}
