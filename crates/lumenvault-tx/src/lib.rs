//! lumenvault-tx: Transaction model for the LumenVault client
//!
//! Provides the typed contract-call values, unsigned transaction and
//! envelope structures, the single-operation transaction builder, and the
//! pure confirmation state machine. Everything here is synchronous and
//! network-free; the async lifecycle lives in soroban-client.

pub mod builder;
pub mod confirm;
pub mod scval;
pub mod transaction;

pub use builder::TransactionBuilder;
pub use confirm::{ConfirmationState, ObservedStatus};
pub use scval::ScVal;
pub use transaction::{
    AuthorizationEntry, InvokeOperation, ResourceData, TransactionEnvelope, UnsignedTransaction,
};
