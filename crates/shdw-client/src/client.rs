//! Main client implementation

use crate::path::{ensure_trailing_separator, normalize_directory, object_key_from_url};
use crate::progress::ProgressReporter;
use crate::types::*;
use crate::upload::TransferStrategy;
use crate::{message, multipart, upload, ClientError, Config, Result};
use reqwest::{header, Client, Response};
use serde_json::json;
use shdw_signer::Signer;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Shadow Drive storage client
pub struct ShdwDriveClient {
    config: Config,
    http: Client,
    signer: Arc<dyn Signer>,
}

impl ShdwDriveClient {
    /// Create a new client with the given configuration and signing capability
    pub fn new(config: Config, signer: Arc<dyn Signer>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ClientError::Config(format!("invalid user agent: {}", config.user_agent)))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Http)?;

        Ok(Self {
            config,
            http,
            signer,
        })
    }

    /// Create with the default configuration
    pub fn with_signer(signer: Arc<dyn Signer>) -> Result<Self> {
        Self::new(Config::default(), signer)
    }

    /// Create with an endpoint URL
    pub fn with_endpoint(endpoint: &str, signer: Arc<dyn Signer>) -> Result<Self> {
        Self::new(Config::new(endpoint), signer)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn signer(&self) -> &dyn Signer {
        &*self.signer
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    // ==================== Upload ====================

    /// Upload a file to a bucket.
    ///
    /// Files at or below the 5 MiB chunk size travel in one signed
    /// request; anything larger is driven through a multipart session.
    /// Progress events flow to the optional sink in `options`: part
    /// completions within [0, 90], then a terminal `complete` at 100, or
    /// a terminal `error` at 0 right before the failure is returned.
    #[instrument(skip(self, file, options), fields(file = %file.name()))]
    pub async fn upload_file(
        &self,
        bucket: &str,
        file: UploadFile,
        options: UploadOptions,
    ) -> Result<UploadResponse> {
        let UploadOptions {
            directory,
            on_progress,
        } = options;
        let reporter = ProgressReporter::new(on_progress);
        let directory = normalize_directory(directory.as_deref().unwrap_or(""));

        let result = match TransferStrategy::for_size(file.size()) {
            TransferStrategy::SingleShot => {
                debug!("starting single request upload");
                upload::upload_small_file(self, bucket, &file, &directory).await
            }
            TransferStrategy::Multipart => {
                debug!(size = file.size(), "file exceeds chunk size, starting multipart upload");
                multipart::upload_large_file(self, bucket, &file, &directory, &reporter).await
            }
        };

        match result {
            Ok(response) => {
                reporter.complete();
                Ok(response)
            }
            Err(error) => {
                reporter.error();
                Err(error)
            }
        }
    }

    // ==================== Object Operations ====================

    /// Delete a file.
    ///
    /// Accepts either a bare object key or the file's full URL; for URLs,
    /// everything after the bucket segment is the key.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, bucket: &str, file_url: &str) -> Result<DeleteFileResponse> {
        let filename = object_key_from_url(file_url, bucket);
        let message = message::delete_file(bucket, &filename);
        let signature = self.signer.sign_message(&message).await?;
        let signer = self.signer.signer_identity()?;

        let response = self
            .http
            .post(self.url("/v1/object/delete"))
            .json(&json!({
                "bucket": bucket,
                "filename": filename,
                "message": signature,
                "signer": signer,
            }))
            .send()
            .await?;

        let status = response.status();
        let body: ApiErrorBody = response
            .json()
            .await
            .map_err(|_| ClientError::InvalidResponse("failed to parse server response".to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body.error.unwrap_or_else(|| "Delete failed".to_string()),
            });
        }

        Ok(DeleteFileResponse {
            message: body
                .message
                .unwrap_or_else(|| "File deleted successfully".to_string()),
            success: true,
        })
    }

    /// List the objects in a bucket owned by this client's signer
    #[instrument(skip(self))]
    pub async fn list_files(&self, bucket: &str) -> Result<Vec<ListObject>> {
        let owner = self.signer.signer_identity()?;

        let response = self
            .http
            .post(self.url("/v1/object/list"))
            .json(&json!({ "bucket": bucket, "owner": owner }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, "Failed to list files").await);
        }

        let body: ListFilesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(body.objects)
    }

    /// Check whether an object with the exact key exists in the bucket
    pub async fn file_exists(&self, bucket: &str, filename: &str) -> Result<bool> {
        let files = self.list_files(bucket).await?;
        Ok(files.iter().any(|file| file.key == filename))
    }

    // ==================== Bucket Operations ====================

    /// Get the storage consumed by a bucket
    #[instrument(skip(self))]
    pub async fn get_bucket_usage(&self, bucket: &str) -> Result<BucketUsage> {
        let response = self
            .http
            .get(self.url("/v1/bucket/usage"))
            .query(&[("bucket", bucket)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, "Failed to get bucket usage").await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ==================== Folder Operations ====================

    /// Create a folder. Folder names always end with exactly one `/`.
    #[instrument(skip(self))]
    pub async fn create_folder(
        &self,
        bucket: &str,
        folder_name: &str,
    ) -> Result<CreateFolderResponse> {
        let folder_name = ensure_trailing_separator(folder_name);
        let message = message::create_folder(bucket, &folder_name);
        let signature = self.signer.sign_message(&message).await?;
        let signer = self.signer.signer_identity()?;

        let response = self
            .http
            .post(self.url("/v1/folder/create"))
            .json(&json!({
                "bucket": bucket,
                "folder_name": folder_name,
                "message": signature,
                "signer": signer,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, "Failed to create folder").await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Delete a folder by its path. Paths always end with exactly one `/`.
    #[instrument(skip(self))]
    pub async fn delete_folder(
        &self,
        bucket: &str,
        folder_path: &str,
    ) -> Result<DeleteFolderResponse> {
        let folder_path = ensure_trailing_separator(folder_path);
        let message = message::delete_folder(bucket, &folder_path);
        let signature = self.signer.sign_message(&message).await?;
        let signer = self.signer.signer_identity()?;

        let response = self
            .http
            .post(self.url("/v1/folder/delete"))
            .json(&json!({
                "bucket": bucket,
                "folder_path": folder_path,
                "message": signature,
                "signer": signer,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, "Failed to delete folder").await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Turn a non-success CRUD response into an [`ClientError::Api`], keeping
/// the service's error text when it sends one.
async fn api_error(response: Response, default: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or_else(|| default.to_string());
    ClientError::Api { status, message }
}
