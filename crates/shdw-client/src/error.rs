//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
///
/// None of these are retried internally. A failure during a multipart
/// session leaves the remote session orphaned; the client issues no
/// compensating abort request.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Signing or identity resolution failed
    #[error(transparent)]
    Signer(#[from] shdw_signer::SignerError),

    /// Single request upload rejected by the service
    #[error("{0}")]
    UploadFailed(String),

    /// Multipart session could not be created
    #[error("failed to initialize multipart upload: {0}")]
    InitiationFailed(String),

    /// A part upload was rejected; the session is abandoned
    #[error("failed to upload part {part}")]
    PartUploadFailed { part: u32 },

    /// The completion call was rejected
    #[error("failed to complete multipart upload: {0}")]
    FinalizationFailed(String),

    /// Response body could not be parsed as the expected JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Non-success response from a bucket or folder operation
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
