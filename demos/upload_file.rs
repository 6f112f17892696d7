//! Upload a file to a bucket, reporting progress.
//!
//! Usage:
//!   SHDW_KEYPAIR=~/.config/solana/id.json \
//!   cargo run --example upload_file -- <bucket> <path> [directory]

use anyhow::Context;
use shdw_client::{Config, ShdwDriveClient, UploadFile, UploadOptions};
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

    let mut args = std::env::args().skip(1);
    let usage = "usage: upload_file <bucket> <path> [directory]";
    let bucket = args.next().context(usage)?;
    let path = args.next().context(usage)?;
    let directory = args.next();

    let signer = Arc::new(load_signer()?);
    let client = ShdwDriveClient::new(Config::default(), signer)?;

    let file = UploadFile::from_path(&path).await?;
    println!("uploading {} ({} bytes)", file.name(), file.size());

    let response = client
        .upload_file(
            &bucket,
            file,
            UploadOptions {
                directory,
                on_progress: Some(Box::new(|event| {
                    println!("  {:?}: {:.0}%", event.status, event.progress);
                })),
            },
        )
        .await?;

    println!("stored at {}", response.finalized_location);
    if let Some(message) = response.message {
        println!("service says: {message}");
    }
    Ok(())
}
