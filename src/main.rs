use anyhow::Result;
use callscribe::cli::{Cli, Commands, RecordingsAction};
use callscribe::config::Config;
use callscribe::defaults;
use callscribe::engine::HttpTranscriptionEngine;
use callscribe::storage::{HttpObjectStore, ObjectStore, read_wav_file};
use callscribe::translate::HttpTranslator;
use callscribe::workflow::{WorkflowOptions, run_batch};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bucket) = cli.bucket {
        config.storage.bucket = bucket;
    }

    match cli.command {
        Commands::Transcribe {
            language,
            translate_to,
            poll_interval,
        } => {
            if let Some(language) = language {
                config.transcription.language = language;
            }
            if translate_to.is_some() {
                config.translation.target_language = translate_to;
            }
            let poll_interval = poll_interval.unwrap_or(std::time::Duration::from_secs(
                config.transcription.poll_interval_secs,
            ));
            run_transcribe(&config, poll_interval, cli.quiet, cli.verbose).await?;
        }
        Commands::Recordings { action } => {
            handle_recordings_command(&config, action, cli.quiet).await?;
        }
    }

    Ok(())
}

/// Load configuration from the given path, or the default path with
/// environment overrides applied.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}

/// Run the batch transcription workflow and print each conversation.
async fn run_transcribe(
    config: &Config,
    poll_interval: std::time::Duration,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let store = HttpObjectStore::new(&config.storage.endpoint, &config.storage.bucket);
    let engine = HttpTranscriptionEngine::new(&config.transcription.endpoint);
    let translator = HttpTranslator::new(&config.translation.endpoint);

    let options = WorkflowOptions {
        bucket: config.storage.bucket.clone(),
        language: config.transcription.language.clone(),
        translate_to: config.translation.target_language.clone(),
        poll_interval,
        quiet,
        verbose,
    };

    let batch = run_batch(&store, &engine, &translator, &options).await?;

    if batch.reports.is_empty() && batch.failures.is_empty() {
        eprintln!("No WAV recordings found in bucket {}", config.storage.bucket);
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    for report in &batch.reports {
        if color {
            println!("{}", report.key.bold());
        } else {
            println!("{}", report.key);
        }
        if !report.conversation.has_channel_data && !quiet && verbose >= 1 {
            eprintln!("(no channel separation; plain transcript)");
        }
        println!("{}", report.conversation.text);
        if let Some(translation) = &report.translation {
            if color {
                println!("{}", "Translation:".bold());
            } else {
                println!("Translation:");
            }
            println!("{translation}");
        }
        println!();
    }

    if !batch.failures.is_empty() {
        for (key, message) in &batch.failures {
            eprintln!("Failed: {key}: {message}");
        }
        anyhow::bail!("{} of the recordings failed to transcribe", batch.failures.len());
    }

    Ok(())
}

/// Handle the recordings management subcommands.
async fn handle_recordings_command(
    config: &Config,
    action: RecordingsAction,
    quiet: bool,
) -> Result<()> {
    let store = HttpObjectStore::new(&config.storage.endpoint, &config.storage.bucket);

    match action {
        RecordingsAction::List => {
            let keys = store.list_recordings().await?;
            if keys.is_empty() {
                eprintln!("No WAV recordings in bucket {}", config.storage.bucket);
            } else {
                for key in keys {
                    println!("{key}");
                }
            }
        }
        RecordingsAction::Upload { file } => {
            let body = read_wav_file(&file)?;
            let key = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", file.display()))?
                .to_string();

            if quiet {
                store.upload(&key, body).await?;
            } else {
                store.upload_with_progress(&key, body).await?;
                eprintln!("Uploaded {key}");
            }
        }
        RecordingsAction::Delete { key } => {
            store.delete(&key).await?;
            if !quiet {
                eprintln!("Deleted {key}");
            }
        }
        RecordingsAction::Url { key } => {
            let url = store
                .presign_url(&key, defaults::PRESIGN_EXPIRY_SECS)
                .await?;
            println!("{url}");
        }
    }

    Ok(())
}
