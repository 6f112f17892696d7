//! # Shadow Drive Signer
//!
//! Signing capability for the Shadow Drive storage client.
//!
//! Every authorized Shadow Drive operation signs a canonical message; the
//! service re-derives the message server-side and verifies the signature
//! against the signer's public key. This crate models that capability as a
//! small trait with exactly two operations and ships two implementations:
//!
//! - [`KeypairSigner`]: signs locally with an ed25519 keypair
//! - [`WalletSigner`]: delegates signing to an external wallet callback
//!
//! Signatures and identities travel as base58 text, matching the service's
//! account format.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shdw_signer::{KeypairSigner, Signer};
//!
//! let signer = KeypairSigner::generate();
//! let signature = signer.sign_message("Shadow Drive Signed Message:\n...").await?;
//! let identity = signer.signer_identity()?;
//! ```

pub mod error;
pub mod keypair;
pub mod wallet;

pub use error::{Result, SignerError};
pub use keypair::KeypairSigner;
pub use wallet::{SignMessageFn, WalletSigner};

use async_trait::async_trait;

/// The signing capability an authorized client operation requires.
///
/// Implementations must be cheap to share; the client holds one signer for
/// its whole lifetime and may sign from concurrent uploads.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign the canonical message text, returning the signature as base58 text.
    async fn sign_message(&self, message: &str) -> Result<String>;

    /// The identity string the service verifies signatures against.
    fn signer_identity(&self) -> Result<String>;
}
