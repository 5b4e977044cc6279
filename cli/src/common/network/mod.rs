//! # carbon-tools Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Downloads external dependency archives. The setup workflow talks to the
//! `Fetcher` trait; `HttpFetcher` implements it with `reqwest`, streaming the
//! response body to disk chunk by chunk so large release archives never sit
//! in memory.
//!
//! A non-success HTTP status is an error (`CarbonError::Download`). The
//! partially written destination file is left for the caller to clean up.
//!
use crate::core::error::{CarbonError, Result};
use anyhow::Context;
use futures_util::StreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Retrieves a remote file.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Downloads `url` into `dest`, returning the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// `Fetcher` backed by a `reqwest` client.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Client with reqwest's defaults (redirects followed, system TLS roots).
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        info!("Downloading {} to {}", url, dest.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CarbonError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CarbonError::Download {
                url: url.to_string(),
                reason: format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                ),
            }
            .into());
        }
        debug!("Content-Length: {:?}", response.content_length());

        let mut file = File::create(dest)
            .await
            .with_context(|| format!("Failed to create file: {}", dest.display()))?;

        let mut stream = response.bytes_stream();
        let mut bytes_downloaded: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| CarbonError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write to {}", dest.display()))?;
            bytes_downloaded += chunk.len() as u64;
        }
        file.flush().await.context("Failed to flush download")?;

        info!(
            "Download complete: {} bytes written to {}",
            bytes_downloaded,
            dest.display()
        );
        Ok(bytes_downloaded)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_download_error() {
        let temp_dir = tempdir().unwrap();
        let dest = temp_dir.path().join("archive.zip");
        // Port 9 on localhost (discard) is not expected to serve HTTP.
        let err = HttpFetcher::new()
            .fetch("http://127.0.0.1:9/archive.zip", &dest)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CarbonError>(),
            Some(CarbonError::Download { .. })
        ));
    }
}
