//! Acquisition of raw rental logs from local files or HTTP(S) URLs.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed = reqwest::Url::parse(url).with_context(|| format!("invalid URL '{url}'"))?;
    client.get(parsed.as_str()).await
}

/// Loads a log from a local path or an `http(s)://` URL, gunzipping it when
/// the payload is gzip-compressed.
#[tracing::instrument(skip(client))]
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source).await?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read '{source}'"))?
    };
    debug!(bytes = bytes.len(), "Source bytes received");

    decompress(bytes)
}

/// Returns `bytes` unchanged unless they start with the gzip magic number.
pub fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice())
        .read_to_end(&mut out)
        .context("failed to decompress gzip source")?;
    debug!(bytes = out.len(), "Source decompressed");
    Ok(out)
}
