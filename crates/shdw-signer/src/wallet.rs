//! Delegated wallet signer

use crate::{Result, Signer, SignerError};
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Callback that signs raw message bytes and resolves to the raw signature bytes
pub type SignMessageFn =
    Box<dyn Fn(Vec<u8>) -> BoxFuture<'static, std::result::Result<Vec<u8>, String>> + Send + Sync>;

/// A signer that delegates signing to an external wallet.
///
/// The wallet exposes its base58 public key and, optionally, a message
/// signing callback. A wallet without the callback can still identify
/// itself but cannot authorize operations.
pub struct WalletSigner {
    public_key: String,
    sign_message: Option<SignMessageFn>,
}

impl WalletSigner {
    /// Create a signer for a wallet that can sign messages
    pub fn new(public_key: impl Into<String>, sign_message: SignMessageFn) -> Self {
        Self {
            public_key: public_key.into(),
            sign_message: Some(sign_message),
        }
    }

    /// Create a watch-only signer that can identify itself but not sign
    pub fn watch_only(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            sign_message: None,
        }
    }

    /// The wallet's base58 public key
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl std::fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSigner")
            .field("public_key", &self.public_key)
            .field("can_sign", &self.sign_message.is_some())
            .finish()
    }
}

#[async_trait]
impl Signer for WalletSigner {
    async fn sign_message(&self, message: &str) -> Result<String> {
        let sign = self
            .sign_message
            .as_ref()
            .ok_or(SignerError::NoSigningMethod)?;
        let signature = sign(message.as_bytes().to_vec())
            .await
            .map_err(SignerError::Signing)?;
        Ok(bs58::encode(signature).into_string())
    }

    fn signer_identity(&self) -> Result<String> {
        if self.public_key.is_empty() {
            return Err(SignerError::NoIdentity);
        }
        Ok(self.public_key.clone())
    }
}
