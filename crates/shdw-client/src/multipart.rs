//! Multipart upload orchestration for large files

use crate::path::{full_key, rewrite_location};
use crate::progress::ProgressReporter;
use crate::types::{
    ApiErrorBody, CompletedPart, InitiateMultipartResponse, PartUploadResponse, UploadFile,
    UploadResponse,
};
use crate::{message, ClientError, Result, ShdwDriveClient, CHUNK_SIZE};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::json;
use std::ops::Range;
use tracing::debug;

/// Number of parts needed for `size` bytes
pub(crate) fn total_parts(size: u64) -> u32 {
    ((size + CHUNK_SIZE - 1) / CHUNK_SIZE) as u32
}

/// Half-open byte ranges for each part, numbered from 1
pub(crate) fn part_ranges(size: u64) -> impl Iterator<Item = (u32, Range<u64>)> {
    (1..=total_parts(size)).map(move |part_number| {
        let start = u64::from(part_number - 1) * CHUNK_SIZE;
        let end = (start + CHUNK_SIZE).min(size);
        (part_number, start..end)
    })
}

/// An in-progress multipart session.
///
/// Created by a successful initiate call; parts must be uploaded in
/// strictly increasing order; consumed by [`complete`](Self::complete).
/// A failed part abandons the session - the remote side is left orphaned,
/// with no resume or abort.
pub struct MultipartUpload<'a> {
    client: &'a ShdwDriveClient,
    bucket: String,
    file_name: String,
    upload_id: String,
    key: String,
    signer: String,
    parts: Vec<CompletedPart>,
}

impl<'a> MultipartUpload<'a> {
    /// Initiate a session for `file` under the canonical `directory`.
    ///
    /// Authorization is established once here; part uploads reuse the
    /// signer identity without re-signing.
    pub async fn initiate(
        client: &'a ShdwDriveClient,
        bucket: &str,
        file: &UploadFile,
        directory: &str,
    ) -> Result<MultipartUpload<'a>> {
        let full_path = full_key(directory, file.name());
        let message = message::initialize_multipart(bucket, file.name(), file.size());
        let signature = client.signer().sign_message(&message).await?;
        let signer = client.signer().signer_identity()?;

        let response = client
            .http()
            .post(client.url("/v1/object/multipart/create"))
            .json(&json!({
                "bucket": bucket,
                "filename": file.name(),
                "message": signature,
                "signer": signer,
                "size": file.size(),
                "file_type": file.content_type(),
                "directory": directory,
                "full_path": full_path,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let reason = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Failed to initialize multipart upload".to_string());
            return Err(ClientError::InitiationFailed(reason));
        }

        let session: InitiateMultipartResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        debug!(upload_id = %session.upload_id, key = %session.key, "multipart session created");

        Ok(MultipartUpload {
            client,
            bucket: bucket.to_string(),
            file_name: file.name().to_string(),
            upload_id: session.upload_id,
            key: session.key,
            signer,
            parts: Vec::new(),
        })
    }

    /// Upload one chunk as `part_number`. Any rejection is terminal for
    /// the session.
    pub async fn upload_part(&mut self, part_number: u32, chunk: Bytes) -> Result<()> {
        let file_part = Part::bytes(chunk.to_vec()).file_name(self.file_name.clone());
        let form = Form::new()
            .part("file", file_part)
            .text("bucket", self.bucket.clone())
            .text("uploadId", self.upload_id.clone())
            .text("partNumber", part_number.to_string())
            .text("key", self.key.clone())
            .text("signer", self.signer.clone());

        let response = self
            .client
            .http()
            .post(self.client.url("/v1/object/multipart/upload-part"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::PartUploadFailed { part: part_number });
        }

        let ack: PartUploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        self.parts.push(CompletedPart {
            etag: ack.etag,
            part_number,
        });
        Ok(())
    }

    /// Finalize the session, consuming it. The acknowledged parts are
    /// echoed back in upload order.
    pub async fn complete(self) -> Result<UploadResponse> {
        let response = self
            .client
            .http()
            .post(self.client.url("/v1/object/multipart/complete"))
            .json(&json!({
                "bucket": self.bucket,
                "uploadId": self.upload_id,
                "key": self.key,
                "parts": self.parts,
                "signer": self.signer,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let reason = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Failed to complete multipart upload".to_string());
            return Err(ClientError::FinalizationFailed(reason));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Session identifier assigned by the service
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Storage key assigned by the service
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of acknowledged parts so far
    pub fn completed_parts(&self) -> usize {
        self.parts.len()
    }
}

/// Drive a whole multipart transfer: initiate, upload each chunk strictly
/// in sequence, finalize, and rewrite the destination location.
///
/// Progress after each part is `(parts_done / N) * 90`; the last 10% is
/// reserved for finalization so the caller never sees 100 before the
/// object is durable.
pub(crate) async fn upload_large_file(
    client: &ShdwDriveClient,
    bucket: &str,
    file: &UploadFile,
    directory: &str,
    reporter: &ProgressReporter,
) -> Result<UploadResponse> {
    let mut upload = MultipartUpload::initiate(client, bucket, file, directory).await?;
    let total = total_parts(file.size());

    for (part_number, range) in part_ranges(file.size()) {
        let chunk = file
            .data()
            .slice(range.start as usize..range.end as usize);
        upload.upload_part(part_number, chunk).await?;
        reporter.uploading(f64::from(part_number) / f64::from(total) * 90.0);
    }

    let mut response = upload.complete().await?;
    response.finalized_location = rewrite_location(&response.finalized_location, bucket, directory);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn partitions_a_12_mib_file_into_three_parts() {
        assert_eq!(total_parts(12 * MIB), 3);
        let ranges: Vec<_> = part_ranges(12 * MIB).collect();
        assert_eq!(
            ranges,
            vec![
                (1, 0..5 * MIB),
                (2, 5 * MIB..10 * MIB),
                (3, 10 * MIB..12 * MIB),
            ]
        );
    }

    #[test]
    fn exact_multiples_have_no_trailing_sliver() {
        assert_eq!(total_parts(10 * MIB), 2);
        let ranges: Vec<_> = part_ranges(10 * MIB).collect();
        assert_eq!(ranges, vec![(1, 0..5 * MIB), (2, 5 * MIB..10 * MIB)]);
    }

    #[test]
    fn one_byte_over_the_chunk_size_needs_two_parts() {
        assert_eq!(total_parts(CHUNK_SIZE + 1), 2);
        let ranges: Vec<_> = part_ranges(CHUNK_SIZE + 1).collect();
        assert_eq!(ranges[1], (2, CHUNK_SIZE..CHUNK_SIZE + 1));
    }
}
