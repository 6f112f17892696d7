//! Common types for the client SDK

use crate::progress::ProgressCallback;
use crate::{ClientError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file staged for upload
#[derive(Clone, Debug)]
pub struct UploadFile {
    name: String,
    data: Bytes,
    content_type: String,
}

impl UploadFile {
    /// Stage in-memory data under a declared name.
    ///
    /// The media type is guessed from the name; override it with
    /// [`with_content_type`](Self::with_content_type).
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            data: data.into(),
            content_type,
        }
    }

    /// Override the declared media type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Stage a file from disk, named after its final path segment
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::Config(format!("path has no file name: {}", path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(name, data))
    }

    /// Declared file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File payload
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Declared size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Declared media type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Options for [`upload_file`](crate::ShdwDriveClient::upload_file)
#[derive(Default)]
pub struct UploadOptions {
    /// Destination directory inside the bucket; normalized before use
    pub directory: Option<String>,
    /// Progress sink; absent is legal and a no-op
    pub on_progress: Option<ProgressCallback>,
}

/// Terminal result of an upload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Where the object landed, rewritten to carry the canonical directory
    pub finalized_location: String,
    /// Optional service message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Per-file failures reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_errors: Option<Vec<UploadErrorDetail>>,
}

/// A per-file failure inside an otherwise successful upload response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadErrorDetail {
    pub file: String,
    pub storage_account: String,
    pub error: String,
}

/// A part acknowledged by the service, echoed back at completion time
#[derive(Clone, Debug, Serialize)]
pub struct CompletedPart {
    /// Opaque integrity tag returned by the part upload
    #[serde(rename = "ETag")]
    pub etag: String,
    /// 1-based sequence number
    #[serde(rename = "PartNumber")]
    pub part_number: u32,
}

/// Result of deleting a file
#[derive(Clone, Debug)]
pub struct DeleteFileResponse {
    pub message: String,
    pub success: bool,
}

/// An object listed from a bucket
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListObject {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified time, as reported by the service
    #[serde(rename = "lastModified")]
    pub last_modified: String,
}

/// Storage consumed by a bucket
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BucketUsage {
    pub bucket: String,
    pub storage_used: u64,
}

/// Result of creating a folder
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateFolderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Result of deleting a folder
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteFolderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

// ==================== Wire-internal bodies ====================

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFilesResponse {
    #[serde(default)]
    pub objects: Vec<ListObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InitiateMultipartResponse {
    #[serde(rename = "uploadId")]
    pub upload_id: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartUploadResponse {
    #[serde(rename = "ETag")]
    pub etag: String,
}
