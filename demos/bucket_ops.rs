//! Inspect a bucket: list its objects and report usage.
//!
//! Usage:
//!   SHDW_KEYPAIR=~/.config/solana/id.json \
//!   cargo run --example bucket_ops -- <bucket>

use anyhow::Context;
use shdw_client::{Config, ShdwDriveClient};
use shdw_signer::KeypairSigner;
use std::sync::Arc;

fn load_signer() -> anyhow::Result<KeypairSigner> {
    let keypair_path =
        std::env::var("SHDW_KEYPAIR").context("SHDW_KEYPAIR must point at a keypair file")?;
    let raw = std::fs::read_to_string(&keypair_path)
        .with_context(|| format!("reading {keypair_path}"))?;
    let bytes: Vec<u8> = serde_json::from_str(&raw).context("keypair file is a JSON byte array")?;
    Ok(KeypairSigner::from_keypair_bytes(&bytes)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let bucket = std::env::args()
        .nth(1)
        .context("usage: bucket_ops <bucket>")?;

    let signer = Arc::new(load_signer()?);
    let client = ShdwDriveClient::new(Config::default(), signer)?;

    let files = client.list_files(&bucket).await?;
    println!("{} objects in {bucket}:", files.len());
    for file in &files {
        println!("  {:>10}  {}  {}", file.size, file.last_modified, file.key);
    }

    let usage = client.get_bucket_usage(&bucket).await?;
    println!("storage used: {} bytes", usage.storage_used);
    Ok(())
}
