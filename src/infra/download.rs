//! HTTP download functionality
//!
//! Handles downloading framework archives with streaming writes, checksum
//! verification, and retry with exponential backoff.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::defaults;
use crate::error::DownloadError;

/// Download result containing file path and metadata
#[derive(Debug)]
pub struct DownloadResult {
    /// Path to the downloaded file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA256 checksum of the downloaded content
    pub checksum: String,
}

/// Download manager for fetching files with retry support
#[derive(Debug, Clone)]
pub struct DownloadManager {
    /// HTTP client
    client: reqwest::Client,
    /// Maximum retry attempts
    max_retries: u32,
}

impl DownloadManager {
    /// Create a new download manager
    pub fn new() -> Self {
        Self::with_max_retries(defaults::MAX_DOWNLOAD_RETRIES)
    }

    /// Create a download manager with a custom retry cap
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(300))
                .connect_timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            max_retries,
        }
    }

    /// Get the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Download a file with exponential-backoff retry
    ///
    /// # Arguments
    /// * `url` - URL to download from
    /// * `dest` - Destination path
    ///
    /// # Returns
    /// Download result with path, size, and checksum
    pub async fn download(&self, url: &str, dest: &Path) -> Result<DownloadResult, DownloadError> {
        let policy = backoff::ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_secs(1))
            .with_max_interval(Duration::from_secs(30))
            .with_max_elapsed_time(None)
            .build();

        let attempts = AtomicU32::new(0);
        let result = backoff::future::retry(policy, || async {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            match self.download_once(url, dest).await {
                Ok(result) => Ok(result),
                Err(e) if attempt >= self.max_retries => Err(backoff::Error::permanent(e)),
                Err(e) => {
                    tracing::debug!("Download attempt {attempt} for {url} failed: {e}");
                    Err(backoff::Error::transient(e))
                }
            }
        })
        .await;

        if result.is_err() {
            // Clean up partial download on failure
            let _ = tokio::fs::remove_file(dest).await;
        }

        result
    }

    /// Single download attempt without retry
    async fn download_once(&self, url: &str, dest: &Path) -> Result<DownloadResult, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::NetworkError {
                url: url.to_string(),
                error: format!("HTTP {}", response.status()),
            });
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::IoError {
                    path: parent.to_path_buf(),
                    error: e.to_string(),
                })?;
        }

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::IoError {
                path: dest.to_path_buf(),
                error: e.to_string(),
            })?;

        let mut hasher = Sha256::new();
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| DownloadError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::IoError {
                    path: dest.to_path_buf(),
                    error: e.to_string(),
                })?;

            hasher.update(&chunk);
            downloaded += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| DownloadError::IoError {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

        let checksum = hex::encode(hasher.finalize());

        Ok(DownloadResult {
            path: dest.to_path_buf(),
            size: downloaded,
            checksum,
        })
    }

    /// Download a file and verify its checksum
    ///
    /// The downloaded file is removed again when the checksum does not match.
    pub async fn download_verified(
        &self,
        url: &str,
        dest: &Path,
        expected_checksum: &str,
    ) -> Result<DownloadResult, DownloadError> {
        let result = self.download(url, dest).await?;

        if result.checksum.to_lowercase() != expected_checksum.to_lowercase() {
            let _ = tokio::fs::remove_file(dest).await;

            return Err(DownloadError::ChecksumFailed {
                file: dest.display().to_string(),
            });
        }

        Ok(result)
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the SHA256 checksum of a file on disk
pub fn file_checksum(path: &Path) -> Result<String, DownloadError> {
    let content = std::fs::read(path).map_err(|e| DownloadError::IoError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}
