//! Asynchronous transcription service client.
//!
//! The remote engine works on a job lifecycle: submit a job pointing at a
//! recording, poll its status until it reaches a terminal state, fetch the
//! result document from the transcript URI, and delete the job. This module
//! is pure glue over the service's HTTP API; the poll loop itself lives in
//! the workflow.

use crate::defaults;
use crate::error::{CallscribeError, Result};
use crate::transcript::EngineResult;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Status of a transcription job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    InProgress,
    Completed { transcript_uri: String },
    Failed { reason: String },
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

/// Parameters for a new transcription job.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub job_name: String,
    /// Store URI of the recording, e.g. `store://calls/2024-01-01.wav`.
    pub media_uri: String,
    /// Language code, e.g. `es-US`.
    pub language: String,
    /// Ask the engine to separate the two call channels.
    pub channel_identification: bool,
}

/// Trait for the remote transcription engine.
#[async_trait::async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Submit a new job.
    async fn start_job(&self, request: &JobRequest) -> Result<()>;

    /// Fetch the current status of a job.
    async fn job_status(&self, job_name: &str) -> Result<JobStatus>;

    /// Fetch and parse the result document of a completed job.
    async fn fetch_result(&self, transcript_uri: &str) -> Result<EngineResult>;

    /// Delete a job. Called after every job regardless of outcome so the
    /// service's job list does not accumulate.
    async fn delete_job(&self, job_name: &str) -> Result<()>;
}

/// Generate a job name unique within this process.
///
/// Uses a startup timestamp plus a counter; the engine only requires names to
/// be unique among live jobs, and jobs are deleted as soon as they finish.
pub fn generate_job_name() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}{secs:x}-{nanos:08x}-{seq}", defaults::JOB_NAME_PREFIX)
}

#[derive(Debug, Serialize)]
struct StartJobBody<'a> {
    job_name: &'a str,
    media_uri: &'a str,
    media_format: &'a str,
    language_code: &'a str,
    channel_identification: bool,
}

#[derive(Debug, Deserialize)]
struct JobStatusBody {
    status: String,
    transcript_uri: Option<String>,
    failure_reason: Option<String>,
}

/// HTTP client for the engine's job API.
pub struct HttpTranscriptionEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriptionEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn job_url(&self, job_name: &str) -> String {
        format!("{}/jobs/{job_name}", self.endpoint)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for HttpTranscriptionEngine {
    async fn start_job(&self, request: &JobRequest) -> Result<()> {
        let body = StartJobBody {
            job_name: &request.job_name,
            media_uri: &request.media_uri,
            media_format: "wav",
            language_code: &request.language,
            channel_identification: request.channel_identification,
        };

        let response = self
            .client
            .post(format!("{}/jobs", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| CallscribeError::JobSubmit {
                job_name: request.job_name.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CallscribeError::JobSubmit {
                job_name: request.job_name.clone(),
                message: format!("status {}", response.status()),
            });
        }
        Ok(())
    }

    async fn job_status(&self, job_name: &str) -> Result<JobStatus> {
        let response = self
            .client
            .get(self.job_url(job_name))
            .send()
            .await
            .map_err(|e| CallscribeError::JobPoll {
                job_name: job_name.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CallscribeError::JobPoll {
                job_name: job_name.to_string(),
                message: format!("status {}", response.status()),
            });
        }

        let body: JobStatusBody =
            response.json().await.map_err(|e| CallscribeError::JobPoll {
                job_name: job_name.to_string(),
                message: format!("unreadable status body: {e}"),
            })?;

        match body.status.as_str() {
            "COMPLETED" => {
                let transcript_uri =
                    body.transcript_uri
                        .ok_or_else(|| CallscribeError::JobPoll {
                            job_name: job_name.to_string(),
                            message: "completed job without transcript_uri".to_string(),
                        })?;
                Ok(JobStatus::Completed { transcript_uri })
            }
            "FAILED" => Ok(JobStatus::Failed {
                reason: body
                    .failure_reason
                    .unwrap_or_else(|| "unspecified".to_string()),
            }),
            _ => Ok(JobStatus::InProgress),
        }
    }

    async fn fetch_result(&self, transcript_uri: &str) -> Result<EngineResult> {
        let response = self.client.get(transcript_uri).send().await?;

        if !response.status().is_success() {
            return Err(CallscribeError::Other(format!(
                "result fetch returned status {}",
                response.status()
            )));
        }

        let raw = response.text().await?;
        EngineResult::from_json(&raw)
    }

    async fn delete_job(&self, job_name: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.job_url(job_name))
            .send()
            .await
            .map_err(|e| CallscribeError::Other(format!("job delete failed: {e}")))?;

        // Idempotent cleanup: a job already gone is fine.
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(CallscribeError::Other(format!(
                "job delete returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Scriptable engine for testing the poll workflow.
///
/// Returns the configured status sequence one entry per poll, repeating the
/// final entry once exhausted, and serves a fixed result document.
pub struct MockTranscriptionEngine {
    statuses: std::sync::Mutex<std::collections::VecDeque<JobStatus>>,
    result_json: String,
    started: std::sync::Mutex<Vec<JobRequest>>,
    deleted: std::sync::Mutex<Vec<String>>,
}

impl MockTranscriptionEngine {
    pub fn new() -> Self {
        Self {
            statuses: std::sync::Mutex::new(std::collections::VecDeque::new()),
            result_json: r#"{"results": {"transcripts": [{"transcript": ""}]}}"#.to_string(),
            started: std::sync::Mutex::new(Vec::new()),
            deleted: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Append a status to the poll sequence.
    pub fn with_status(self, status: JobStatus) -> Self {
        if let Ok(mut statuses) = self.statuses.lock() {
            statuses.push_back(status);
        }
        self
    }

    /// Set the result document served by `fetch_result`.
    pub fn with_result_json(mut self, json: &str) -> Self {
        self.result_json = json.to_string();
        self
    }

    /// Job requests submitted so far.
    pub fn started_jobs(&self) -> Vec<JobRequest> {
        self.started.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Job names deleted so far.
    pub fn deleted_jobs(&self) -> Vec<String> {
        self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Default for MockTranscriptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn start_job(&self, request: &JobRequest) -> Result<()> {
        self.started
            .lock()
            .map_err(|_| CallscribeError::Other("mock engine lock poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }

    async fn job_status(&self, job_name: &str) -> Result<JobStatus> {
        let mut statuses = self
            .statuses
            .lock()
            .map_err(|_| CallscribeError::Other("mock engine lock poisoned".to_string()))?;
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap_or(JobStatus::InProgress))
        } else {
            statuses
                .front()
                .cloned()
                .ok_or_else(|| CallscribeError::JobPoll {
                    job_name: job_name.to_string(),
                    message: "mock engine has no scripted status".to_string(),
                })
        }
    }

    async fn fetch_result(&self, _transcript_uri: &str) -> Result<EngineResult> {
        EngineResult::from_json(&self.result_json)
    }

    async fn delete_job(&self, job_name: &str) -> Result<()> {
        self.deleted
            .lock()
            .map_err(|_| CallscribeError::Other("mock engine lock poisoned".to_string()))?
            .push(job_name.to_string());
        Ok(())
    }
}
