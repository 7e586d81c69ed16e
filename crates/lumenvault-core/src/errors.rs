//! Error types for the LumenVault client
//!
//! Every category except view-call failures propagates to the caller; the
//! client performs no automatic retries. View calls alone swallow failures
//! and hand back `None` because they feed passive display, not a financial
//! action.

use thiserror::Error;

/// Core errors that can occur in the client
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Transaction error: {0}")]
    Tx(#[from] TxError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Network transport and endpoint errors. Transient, surfaced as-is; a
/// retry is always a fresh user-initiated action.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Endpoint unreachable: {url}")]
    Unreachable { url: String },

    #[error("Endpoint returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Account not found: {address}")]
    AccountNotFound { address: String },
}

/// Transaction lifecycle errors
#[derive(Debug, Error)]
pub enum TxError {
    /// Simulation rejected the probe. Terminal for this attempt; the
    /// finalize step must never run after this.
    #[error("Simulation failed: {diagnostic}")]
    SimulationFailed { diagnostic: String },

    /// The user declined to sign (or the wallet produced no envelope).
    /// Informational, not a system fault; submission must never happen.
    #[error("Signing cancelled by user")]
    SigningCancelled,

    /// Rejected at the gateway (bad sequence, underbid fee, ...). Not
    /// retried; resubmission with adjusted input is the caller's decision.
    #[error("Submission rejected: {message}")]
    SubmitFailed { message: String },

    /// The transaction executed and reverted on-chain. Terminal.
    #[error("Transaction {hash} failed on-chain")]
    OnChainFailure { hash: String },

    /// Polling budget exhausted without a terminal status. Ambiguous: the
    /// transaction may still land. Must be surfaced as "status unknown",
    /// never folded into success or failure.
    #[error("Transaction {hash} not confirmed after {attempts} attempts")]
    ConfirmationTimeout { hash: String, attempts: u32 },

    /// Envelope or wallet bound to a different network than configured.
    /// Checked before submission as a cross-network replay guard.
    #[error("Wrong network: expected {expected:?}, got {actual:?}")]
    WrongNetwork { expected: String, actual: String },

    /// Envelope string could not be decoded
    #[error("Malformed envelope: {message}")]
    MalformedEnvelope { message: String },

    /// An in-flight submit/poll cycle was cancelled via its handle.
    #[error("Operation cancelled")]
    Cancelled,
}

/// Protocol-level validation errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Wallet extension not available")]
    WalletUnavailable,

    #[error("Wallet permission denied")]
    PermissionDenied,
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for outcomes that reflect a user decision rather than a fault.
    /// These are reported as informational, not as errors.
    pub fn is_user_cancellation(&self) -> bool {
        matches!(
            self,
            Error::Tx(TxError::SigningCancelled) | Error::Tx(TxError::Cancelled)
        )
    }

    /// True when the final ledger status is unknown: the caller must not
    /// assume the transaction did or did not land.
    pub fn is_ambiguous_outcome(&self) -> bool {
        matches!(self, Error::Tx(TxError::ConfirmationTimeout { .. }))
    }
}
