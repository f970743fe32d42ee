//! Remote recording store client.
//!
//! Call recordings live in a remote object-store bucket. This module exposes
//! the operations the console needs: list `.wav` keys, upload, delete, and
//! issue a presigned playback URL. The `ObjectStore` trait allows swapping
//! the HTTP implementation for a mock in tests.

use crate::defaults;
use crate::error::{CallscribeError, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Trait for the remote recording store.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the keys of all `.wav` recordings in the bucket.
    async fn list_recordings(&self) -> Result<Vec<String>>;

    /// Upload a local file under `key`.
    async fn upload(&self, key: &str, body: Vec<u8>) -> Result<()>;

    /// Delete the recording stored under `key`.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Issue a presigned playback URL for `key`, valid for `expires_secs`.
    async fn presign_url(&self, key: &str, expires_secs: u64) -> Result<String>;
}

/// Validate that a local file is a readable WAV before uploading.
///
/// Rejecting a bad payload here is cheaper than a server-side failure after
/// the bytes have been shipped. Returns the file contents on success.
pub fn read_wav_file(path: &Path) -> Result<Vec<u8>> {
    hound::WavReader::open(path).map_err(|e| CallscribeError::InvalidWav {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(std::fs::read(path)?)
}

/// HTTP client for the store's REST API.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/buckets/{}/objects/{}", self.endpoint, self.bucket, key)
    }

    /// Upload with a terminal progress bar (operator-facing path).
    pub async fn upload_with_progress(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let total = body.len() as u64;
        let pb = ProgressBar::new(total);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );

        let progress = pb.clone();
        let stream = futures_util::stream::iter(
            body.chunks(64 * 1024)
                .map(|c| Ok::<_, std::io::Error>(c.to_vec()))
                .collect::<Vec<_>>(),
        )
        .inspect(move |chunk| {
            if let Ok(chunk) = chunk {
                progress.inc(chunk.len() as u64);
            }
        });

        let response = self
            .client
            .put(self.object_url(key))
            .header("content-type", "audio/wav")
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await
            .map_err(|e| CallscribeError::Storage {
                message: format!("upload failed: {e}"),
            })?;

        pb.finish_and_clear();
        check_status(response, key).await?;
        Ok(())
    }
}

/// Turn a non-success response into a storage error, mapping 404 onto
/// `RecordingNotFound`.
async fn check_status(response: reqwest::Response, key: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CallscribeError::RecordingNotFound {
            key: key.to_string(),
        });
    }
    if !status.is_success() {
        return Err(CallscribeError::Storage {
            message: format!("status {status} for {key}"),
        });
    }
    Ok(response)
}

#[derive(Debug, serde::Deserialize)]
struct ListResponse {
    #[serde(default)]
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct ObjectEntry {
    key: String,
}

#[derive(Debug, serde::Deserialize)]
struct PresignResponse {
    url: String,
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    async fn list_recordings(&self) -> Result<Vec<String>> {
        let url = format!("{}/buckets/{}/objects", self.endpoint, self.bucket);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CallscribeError::Storage {
                message: format!("list failed: {e}"),
            })?;

        let response = check_status(response, &self.bucket).await?;
        let listing: ListResponse =
            response.json().await.map_err(|e| CallscribeError::Storage {
                message: format!("unreadable listing: {e}"),
            })?;

        Ok(listing
            .objects
            .into_iter()
            .map(|entry| entry.key)
            .filter(|key| key.ends_with(defaults::WAV_EXTENSION))
            .collect())
    }

    async fn upload(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .put(self.object_url(key))
            .header("content-type", "audio/wav")
            .body(body)
            .send()
            .await
            .map_err(|e| CallscribeError::Storage {
                message: format!("upload failed: {e}"),
            })?;
        check_status(response, key).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.object_url(key))
            .send()
            .await
            .map_err(|e| CallscribeError::Storage {
                message: format!("delete failed: {e}"),
            })?;
        check_status(response, key).await?;
        Ok(())
    }

    async fn presign_url(&self, key: &str, expires_secs: u64) -> Result<String> {
        let url = format!("{}/presign?expires={expires_secs}", self.object_url(key));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CallscribeError::Storage {
                message: format!("presign failed: {e}"),
            })?;
        let response = check_status(response, key).await?;
        let presign: PresignResponse =
            response.json().await.map_err(|e| CallscribeError::Storage {
                message: format!("unreadable presign response: {e}"),
            })?;
        Ok(presign.url)
    }
}

/// In-memory store for testing.
#[derive(Debug, Default)]
pub struct MockObjectStore {
    objects: std::sync::Mutex<std::collections::BTreeMap<String, Vec<u8>>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a recording.
    pub fn with_recording(self, key: &str) -> Self {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(key.to_string(), Vec::new());
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    async fn list_recordings(&self) -> Result<Vec<String>> {
        let objects = self
            .objects
            .lock()
            .map_err(|_| CallscribeError::Other("mock store lock poisoned".to_string()))?;
        Ok(objects
            .keys()
            .filter(|key| key.ends_with(defaults::WAV_EXTENSION))
            .cloned()
            .collect())
    }

    async fn upload(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| CallscribeError::Other("mock store lock poisoned".to_string()))?;
        objects.insert(key.to_string(), body);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| CallscribeError::Other("mock store lock poisoned".to_string()))?;
        objects
            .remove(key)
            .ok_or_else(|| CallscribeError::RecordingNotFound {
                key: key.to_string(),
            })?;
        Ok(())
    }

    async fn presign_url(&self, key: &str, expires_secs: u64) -> Result<String> {
        if !self.contains(key) {
            return Err(CallscribeError::RecordingNotFound {
                key: key.to_string(),
            });
        }
        Ok(format!("mock://{key}?expires={expires_secs}"))
    }
}
