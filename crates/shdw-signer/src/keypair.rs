//! Local ed25519 keypair signer

use crate::{Result, Signer, SignerError};
use async_trait::async_trait;
use ed25519_dalek::{Signer as _, SigningKey};
use rand::rngs::OsRng;

/// Size of an ed25519 secret key in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of an exported keypair (secret ∥ public) in bytes
pub const KEYPAIR_SIZE: usize = 64;

/// A signer backed by a local ed25519 keypair.
///
/// The keypair never leaves the client; only base58 signatures and the
/// base58 public key are sent to the service.
pub struct KeypairSigner {
    signing_key: SigningKey,
}

impl KeypairSigner {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a signer from a 32-byte secret key
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_SIZE {
            return Err(SignerError::InvalidKey(format!(
                "secret key must be {} bytes, got {}",
                SECRET_KEY_SIZE,
                bytes.len()
            )));
        }
        let mut secret = [0u8; SECRET_KEY_SIZE];
        secret.copy_from_slice(bytes);
        Ok(Self {
            signing_key: SigningKey::from_bytes(&secret),
        })
    }

    /// Create a signer from a 64-byte exported keypair (secret ∥ public)
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEYPAIR_SIZE {
            return Err(SignerError::InvalidKey(format!(
                "keypair must be {} bytes, got {}",
                KEYPAIR_SIZE,
                bytes.len()
            )));
        }
        let mut keypair = [0u8; KEYPAIR_SIZE];
        keypair.copy_from_slice(bytes);
        let signing_key = SigningKey::from_keypair_bytes(&keypair)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// The base58-encoded public key
    pub fn public_key(&self) -> String {
        bs58::encode(self.signing_key.verifying_key().as_bytes()).into_string()
    }
}

impl std::fmt::Debug for KeypairSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeypairSigner({})", self.public_key())
    }
}

#[async_trait]
impl Signer for KeypairSigner {
    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self.signing_key.sign(message.as_bytes());
        Ok(bs58::encode(signature.to_bytes()).into_string())
    }

    fn signer_identity(&self) -> Result<String> {
        Ok(self.public_key())
    }
}
