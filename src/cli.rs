//! Command-line interface for callscribe
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Operator console for transcribing two-party call recordings
#[derive(Parser, Debug)]
#[command(
    name = "callscribe",
    version = crate::version_string(),
    about = "Transcribe two-party call recordings via a remote speech-to-text service"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Recording bucket override
    #[arg(long, global = true, value_name = "NAME")]
    pub bucket: Option<String>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: job lifecycle detail, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe every recording in the bucket and print the conversations
    Transcribe {
        /// Transcription language code (es-US or en-US)
        #[arg(long, value_name = "LANG")]
        language: Option<String>,

        /// Translate transcripts to this language (en, es, fr, de, zh, ja)
        #[arg(long, value_name = "LANG")]
        translate_to: Option<String>,

        /// Job status poll interval (default from config, 2s). Examples: 2s, 500ms
        #[arg(long, value_name = "DURATION", value_parser = parse_poll_interval)]
        poll_interval: Option<Duration>,
    },

    /// Manage call recordings in the bucket
    Recordings {
        /// Action to perform
        #[command(subcommand)]
        action: RecordingsAction,
    },
}

/// Recording management actions
#[derive(Subcommand, Debug)]
pub enum RecordingsAction {
    /// List WAV recordings in the bucket
    List,

    /// Upload a local WAV file
    Upload {
        /// Path to the WAV file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Delete a recording
    Delete {
        /// Recording key
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print a presigned playback URL for a recording
    Url {
        /// Recording key
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Parse a poll interval string into a duration.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`2s`, `500ms`), and compound (`1m30s`).
fn parse_poll_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}
