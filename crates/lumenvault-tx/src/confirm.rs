//! Confirmation state machine
//!
//! Pure transition logic for the post-submission polling loop:
//! `Submitted -> Pending -> {Confirmed, Failed, TimedOut}`. The driver in
//! soroban-client feeds observed statuses in; keeping the transitions pure
//! makes them testable without a network or a clock.

use lumenvault_core::TxHash;

use crate::scval::ScVal;

/// Ledger status of a submitted transaction as observed by one poll query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedStatus {
    /// Not yet in a ledger (includes "pending" acks); keep polling
    NotFound,
    /// Applied successfully, optionally with a decoded return value
    Success { return_value: Option<ScVal> },
    /// Executed and reverted; terminal
    Failed { diagnostic: String },
}

/// Confirmation progress for one submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Accepted by the gateway; no status query made yet
    Submitted { hash: TxHash },
    /// `attempt` status queries made, none terminal yet
    Pending { hash: TxHash, attempt: u32 },
    Confirmed {
        hash: TxHash,
        return_value: Option<ScVal>,
    },
    Failed { hash: TxHash, diagnostic: String },
    /// Attempt budget exhausted. Ambiguous: the transaction may still land.
    TimedOut { hash: TxHash, attempts: u32 },
}

impl ConfirmationState {
    pub fn submitted(hash: TxHash) -> Self {
        Self::Submitted { hash }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Confirmed { .. } | Self::Failed { .. } | Self::TimedOut { .. }
        )
    }

    pub fn hash(&self) -> &TxHash {
        match self {
            Self::Submitted { hash }
            | Self::Pending { hash, .. }
            | Self::Confirmed { hash, .. }
            | Self::Failed { hash, .. }
            | Self::TimedOut { hash, .. } => hash,
        }
    }

    /// Consume one observed status. Terminal states absorb further input.
    pub fn observe(self, status: ObservedStatus, max_attempts: u32) -> Self {
        let (hash, attempt) = match self {
            Self::Submitted { hash } => (hash, 0),
            Self::Pending { hash, attempt } => (hash, attempt),
            terminal => return terminal,
        };

        match status {
            ObservedStatus::Success { return_value } => Self::Confirmed { hash, return_value },
            ObservedStatus::Failed { diagnostic } => Self::Failed { hash, diagnostic },
            ObservedStatus::NotFound => {
                let attempt = attempt + 1;
                if attempt >= max_attempts {
                    Self::TimedOut {
                        hash,
                        attempts: attempt,
                    }
                } else {
                    Self::Pending { hash, attempt }
                }
            }
        }
    }
}
