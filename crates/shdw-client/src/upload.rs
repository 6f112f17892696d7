//! Transfer strategy selection and the single request uploader

use crate::path::{full_key, rewrite_location};
use crate::types::{ApiErrorBody, UploadFile, UploadResponse};
use crate::{message, ClientError, Result, ShdwDriveClient, CHUNK_SIZE};
use reqwest::header;
use reqwest::multipart::{Form, Part};
use sha2::{Digest, Sha256};
use tracing::debug;

/// How a file reaches the service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferStrategy {
    /// One signed request carrying the whole file
    SingleShot,
    /// A chunked multipart session
    Multipart,
}

impl TransferStrategy {
    /// Select the strategy for a file of `size` bytes.
    ///
    /// Files at or below [`CHUNK_SIZE`](crate::CHUNK_SIZE) fit a single
    /// request; the boundary is inclusive.
    pub fn for_size(size: u64) -> Self {
        if size <= CHUNK_SIZE {
            Self::SingleShot
        } else {
            Self::Multipart
        }
    }
}

/// Upload a file that fits a single signed request.
///
/// `directory` must already be canonical; it is sent as an explicit field
/// alongside the full destination key.
pub(crate) async fn upload_small_file(
    client: &ShdwDriveClient,
    bucket: &str,
    file: &UploadFile,
    directory: &str,
) -> Result<UploadResponse> {
    let full_path = full_key(directory, file.name());
    // the fingerprint covers the file name only, per the service contract
    let name_hash = hex::encode(Sha256::digest(file.name().as_bytes()));
    let message = message::upload_file(bucket, &name_hash);
    let signature = client.signer().sign_message(&message).await?;
    let signer = client.signer().signer_identity()?;

    let file_part = Part::bytes(file.data().to_vec())
        .file_name(file.name().to_string())
        .mime_str(file.content_type())?;
    let form = Form::new()
        .part("file", file_part)
        .text("message", signature)
        .text("signer", signer)
        .text("storage_account", bucket.to_string())
        .text("directory", directory.to_string())
        .text("filename", file.name().to_string())
        .text("full_path", full_path);

    debug!(%bucket, file = %file.name(), "sending single request upload");
    let response = client
        .http()
        .post(client.url("/v1/object/upload"))
        .multipart(form)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(upload_error(response).await);
    }

    let mut body: UploadResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
    body.finalized_location = rewrite_location(&body.finalized_location, bucket, directory);
    Ok(body)
}

/// Derive the terminal error for a rejected upload request.
///
/// JSON responses surface their `error`/`message` field; anything else is
/// truncated into a bounded excerpt together with the status code, so the
/// failure stays diagnosable without a structured body.
pub(crate) async fn upload_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        match response.json::<ApiErrorBody>().await {
            Ok(body) => ClientError::UploadFailed(
                body.error
                    .or(body.message)
                    .unwrap_or_else(|| "Upload failed".to_string()),
            ),
            Err(_) => ClientError::UploadFailed(format!(
                "Upload failed - Status: {status}, Error parsing response"
            )),
        }
    } else {
        let text = response.text().await.unwrap_or_default();
        let excerpt: String = text.chars().take(200).collect();
        ClientError::UploadFailed(format!(
            "Upload failed - Status: {status}, Response: {excerpt}..."
        ))
    }
}
