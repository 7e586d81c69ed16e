//! Wallet signing-provider seam
//!
//! The browser wallet extension is an external collaborator; this trait is
//! the whole surface the client consumes. Signing never exposes key
//! material to the client: an unsigned envelope string goes out, a signed
//! one (or nothing, on cancellation) comes back.

use async_trait::async_trait;

use lumenvault_core::{AccountId, Error, Network, ProtocolError, TxError};

#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Whether the wallet extension is installed at all
    async fn is_available(&self) -> bool;

    /// Whether this origin already holds a connection approval
    async fn is_permitted(&self) -> bool;

    /// Ask the user to approve the connection
    async fn request_permission(&self) -> Result<(), ProtocolError>;

    async fn get_address(&self) -> Result<AccountId, ProtocolError>;

    /// Passphrase of the network the wallet is currently switched to
    async fn network_passphrase(&self) -> Result<String, ProtocolError>;

    /// Sign an envelope. `None` means the user cancelled or signing
    /// failed; it must be reported as a cancellation, not a system error.
    async fn sign(&self, envelope_b64: &str, network_passphrase: &str) -> Option<String>;
}

/// Establish a wallet connection: availability, permission, and a network
/// check. A wallet switched to a different network than the client is
/// rejected here, before any flow starts.
pub async fn connect(wallet: &dyn WalletConnector, network: Network) -> Result<AccountId, Error> {
    if !wallet.is_available().await {
        return Err(ProtocolError::WalletUnavailable.into());
    }

    if !wallet.is_permitted().await {
        wallet.request_permission().await?;
    }

    let passphrase = wallet.network_passphrase().await?;
    if passphrase != network.passphrase() {
        return Err(TxError::WrongNetwork {
            expected: network.passphrase().to_string(),
            actual: passphrase,
        }
        .into());
    }

    Ok(wallet.get_address().await?)
}
