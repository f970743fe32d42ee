//! Batch transcription workflow.
//!
//! Drives one recording through the full pipeline:
//! submit job → poll until terminal → fetch result → assemble conversation →
//! optionally translate → delete job. The batch runner applies this to every
//! recording in the bucket, sequentially, and reports per-recording failures
//! without aborting the batch.
//!
//! Everything the pipeline produces is returned as values; nothing is held in
//! ambient or session-wide state.

use crate::engine::{JobRequest, JobStatus, TranscriptionEngine, generate_job_name};
use crate::error::{CallscribeError, Result};
use crate::storage::ObjectStore;
use crate::transcript::{Conversation, assemble};
use crate::translate::{Translator, should_translate, source_language};
use std::time::Duration;

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub bucket: String,
    /// Transcription language code, e.g. "es-US".
    pub language: String,
    /// Bare target language code; None disables translation.
    pub translate_to: Option<String>,
    pub poll_interval: Duration,
    /// Suppress progress reporting on stderr.
    pub quiet: bool,
    /// Verbosity level (0=default, 1=job lifecycle detail, 2=full diagnostics).
    pub verbose: u8,
}

/// Result of transcribing one recording.
#[derive(Debug, Clone)]
pub struct RecordingReport {
    pub key: String,
    pub conversation: Conversation,
    /// Present when a translation pass ran.
    pub translation: Option<String>,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<RecordingReport>,
    /// Keys that failed, with the error message.
    pub failures: Vec<(String, String)>,
}

/// Transcribe every `.wav` recording in the bucket, sequentially.
///
/// An empty bucket is not an error; the returned report is simply empty.
pub async fn run_batch(
    store: &dyn ObjectStore,
    engine: &dyn TranscriptionEngine,
    translator: &dyn Translator,
    options: &WorkflowOptions,
) -> Result<BatchReport> {
    let keys = store.list_recordings().await?;

    let mut batch = BatchReport::default();
    for key in keys {
        if !options.quiet {
            eprintln!("Transcribing {key}...");
        }
        match transcribe_recording(engine, translator, &key, options).await {
            Ok(report) => batch.reports.push(report),
            Err(e) => {
                if !options.quiet {
                    eprintln!("Failed: {key}: {e}");
                }
                batch.failures.push((key, e.to_string()));
            }
        }
    }
    Ok(batch)
}

/// Drive one recording through submit → poll → fetch → assemble → translate.
///
/// The job is deleted before returning, on success and on failure alike, so
/// the engine's job list stays clean.
pub async fn transcribe_recording(
    engine: &dyn TranscriptionEngine,
    translator: &dyn Translator,
    key: &str,
    options: &WorkflowOptions,
) -> Result<RecordingReport> {
    let job_name = generate_job_name();
    let request = JobRequest {
        job_name: job_name.clone(),
        media_uri: format!("store://{}/{key}", options.bucket),
        language: options.language.clone(),
        channel_identification: true,
    };

    engine.start_job(&request).await?;
    if !options.quiet && options.verbose >= 1 {
        eprintln!("Started job {job_name} for {key}");
    }

    let outcome = await_and_assemble(engine, translator, &job_name, options).await;

    // Cleanup happens regardless of outcome; a cleanup failure only surfaces
    // when the job itself succeeded.
    let cleanup = engine.delete_job(&job_name).await;
    let report = outcome?;
    cleanup?;

    Ok(RecordingReport {
        key: key.to_string(),
        conversation: report.0,
        translation: report.1,
    })
}

/// Poll to terminal status, then fetch, assemble, and optionally translate.
async fn await_and_assemble(
    engine: &dyn TranscriptionEngine,
    translator: &dyn Translator,
    job_name: &str,
    options: &WorkflowOptions,
) -> Result<(Conversation, Option<String>)> {
    let transcript_uri = await_job(engine, job_name, options.poll_interval).await?;
    if !options.quiet && options.verbose >= 2 {
        eprintln!("Job {job_name} completed; fetching {transcript_uri}");
    }

    let result = engine.fetch_result(&transcript_uri).await?;
    let plain = result.plain_transcript()?;
    let channels = result.channels()?;
    let conversation = assemble(&channels, plain);

    let translation = if should_translate(&options.language, options.translate_to.as_deref()) {
        // Safe to deref: should_translate returned true only with a target set
        let target = options.translate_to.as_deref().unwrap_or_default();
        let source = source_language(&options.language);
        Some(
            translator
                .translate(&conversation.text, source, target)
                .await?,
        )
    } else {
        None
    };

    Ok((conversation, translation))
}

/// Poll the job until it reaches a terminal state.
///
/// No internal timeout: a slow job runs to completion or failure, matching
/// the engine's own lifecycle guarantees.
async fn await_job(
    engine: &dyn TranscriptionEngine,
    job_name: &str,
    poll_interval: Duration,
) -> Result<String> {
    loop {
        match engine.job_status(job_name).await? {
            JobStatus::InProgress => tokio::time::sleep(poll_interval).await,
            JobStatus::Completed { transcript_uri } => return Ok(transcript_uri),
            JobStatus::Failed { reason } => {
                return Err(CallscribeError::JobFailed {
                    job_name: job_name.to_string(),
                    reason,
                });
            }
        }
    }
}
