//! # Shadow Drive Client SDK
//!
//! A client SDK for the Shadow Drive object-storage service.
//!
//! Every authorized operation signs a canonical text message; the service
//! verifies the signature against the signer's public key before touching
//! the bucket. Small files travel in one signed request; anything above
//! the 5 MiB chunk size is driven through a multipart session with
//! per-part progress reporting.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shdw_client::{Config, ShdwDriveClient, UploadFile, UploadOptions};
//! use shdw_signer::KeypairSigner;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let signer = Arc::new(KeypairSigner::generate());
//!     let client = ShdwDriveClient::with_signer(signer)?;
//!
//!     let file = UploadFile::from_path("photos/cat.jpg").await?;
//!     let response = client
//!         .upload_file(
//!             "my-bucket",
//!             file,
//!             UploadOptions {
//!                 directory: Some("photos".to_string()),
//!                 on_progress: Some(Box::new(|p| println!("{:.0}%", p.progress))),
//!             },
//!         )
//!         .await?;
//!     println!("stored at {}", response.finalized_location);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod message;
mod multipart;
mod path;
mod progress;
mod types;
mod upload;

pub use client::ShdwDriveClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use multipart::MultipartUpload;
pub use path::{full_key, normalize_directory};
pub use progress::{ProgressCallback, UploadProgress, UploadStatus};
pub use types::{
    BucketUsage, CompletedPart, CreateFolderResponse, DeleteFileResponse, DeleteFolderResponse,
    ListObject, UploadErrorDetail, UploadFile, UploadOptions, UploadResponse,
};
pub use upload::TransferStrategy;

/// Fixed chunk size for multipart transfers (5 MiB), also the single
/// request size threshold
pub const CHUNK_SIZE: u64 = 5 * 1024 * 1024;

/// Default service endpoint
pub const DEFAULT_ENDPOINT: &str = "https://v2.shdwdrive.com";
