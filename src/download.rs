//! Binary downloads with redirect handling and cleanup guarantees.
//!
//! A destination file either exists in full or not at all: bytes stream into
//! a temp file next to the destination and only persist once the transfer
//! completes. Redirects are followed manually so the hop count stays bounded.

use crate::{Error, Result};
use reqwest::{redirect, Client, StatusCode, Url};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Redirect hop limit for a single download.
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Write bytes to `dest` via a temp file in the same directory, so a failed
/// write never leaves a partial file under the final name.
pub(crate) fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(dest)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}

pub struct FileDownloader {
    client: Client,
}

impl FileDownloader {
    pub fn new() -> Self {
        // Redirects are followed by hand in `download` so the hop count can
        // be enforced and Location targets logged.
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Stream `url` into `dest`. If `dest` already exists the network is not
    /// touched and the existing path is returned as-is.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<PathBuf> {
        if dest.exists() {
            tracing::info!("File already exists, skipping download: {}", dest.display());
            return Ok(dest.to_path_buf());
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut current = Url::parse(url)
            .map_err(|e| Error::Generic(format!("Invalid download URL {}: {}", url, e)))?;

        for hop in 0..=MAX_REDIRECT_HOPS {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(Error::from_reqwest)?;

            let status = response.status();
            if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| Error::Download {
                        status: status.as_u16(),
                        url: current.to_string(),
                    })?;

                current = current.join(location).map_err(|e| {
                    Error::Generic(format!("Invalid redirect target {}: {}", location, e))
                })?;
                tracing::debug!("Following redirect (hop {}) to {}", hop + 1, current);
                continue;
            }

            if status != StatusCode::OK {
                return Err(Error::Download {
                    status: status.as_u16(),
                    url: current.to_string(),
                });
            }

            return self.stream_to_file(response, dest).await;
        }

        Err(Error::TooManyRedirects {
            hops: MAX_REDIRECT_HOPS,
            url: url.to_string(),
        })
    }

    async fn stream_to_file(&self, mut response: reqwest::Response, dest: &Path) -> Result<PathBuf> {
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir)?;

        // The temp file is dropped (and unlinked) if any chunk fails.
        while let Some(chunk) = response.chunk().await.map_err(Error::from_reqwest)? {
            file.write_all(&chunk)?;
        }

        file.persist(dest).map_err(|e| Error::Io(e.error))?;
        tracing::info!("Downloaded to {}", dest.display());
        Ok(dest.to_path_buf())
    }
}

impl Default for FileDownloader {
    fn default() -> Self {
        Self::new()
    }
}
