//! Error types for the shdw-signer crate

use thiserror::Error;

/// Result type alias using `SignerError`
pub type Result<T> = std::result::Result<T, SignerError>;

/// Errors that can occur while signing or resolving an identity
#[derive(Error, Debug)]
pub enum SignerError {
    /// No signing mechanism is configured (e.g. a watch-only wallet)
    #[error("no signing method available")]
    NoSigningMethod,

    /// No identity is configured
    #[error("no signer available")]
    NoIdentity,

    /// Invalid key material
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The delegated signer failed to produce a signature
    #[error("signing failed: {0}")]
    Signing(String),
}
