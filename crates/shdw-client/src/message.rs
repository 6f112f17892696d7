//! Canonical signed message templates
//!
//! The service rebuilds each message from the request fields and compares
//! it byte-for-byte before verifying the signature, so the literal text
//! here is part of the wire contract.

/// Single request upload. The hash covers the file name only, not its
/// content; two files sharing a name sign identically.
pub(crate) fn upload_file(bucket: &str, name_hash: &str) -> String {
    format!(
        "Shadow Drive Signed Message:\nStorage Account: {bucket}\nUpload file with hash: {name_hash}"
    )
}

pub(crate) fn initialize_multipart(bucket: &str, filename: &str, size: u64) -> String {
    format!(
        "Shadow Drive Signed Message:\nInitialize multipart upload\nBucket: {bucket}\nFilename: {filename}\nFile size: {size}"
    )
}

pub(crate) fn delete_file(bucket: &str, filename: &str) -> String {
    format!("Shadow Drive Signed Message:\nDelete file\nBucket: {bucket}\nFilename: {filename}")
}

pub(crate) fn create_folder(bucket: &str, folder_name: &str) -> String {
    format!(
        "Shadow Drive Signed Message:\nCreate folder\nBucket: {bucket}\nFolder name: {folder_name}"
    )
}

pub(crate) fn delete_folder(bucket: &str, folder_path: &str) -> String {
    format!(
        "Shadow Drive Signed Message:\nDelete folder\nBucket: {bucket}\nFolder path: {folder_path}"
    )
}
