use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub transcription: TranscriptionConfig,
    pub translation: TranslationConfig,
}

/// Recording store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
}

/// Transcription service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub language: String,
    pub poll_interval_secs: u64,
}

/// Translation service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
    /// Bare target language code ("en", "fr"); None disables translation.
    pub target_language: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            bucket: "call-recordings".to_string(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9100".to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            poll_interval_secs: defaults::POLL_INTERVAL_SECS,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9200".to_string(),
            target_language: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CALLSCRIBE_BUCKET → storage.bucket
    /// - CALLSCRIBE_LANGUAGE → transcription.language
    /// - CALLSCRIBE_TRANSLATE_TO → translation.target_language
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bucket) = std::env::var("CALLSCRIBE_BUCKET")
            && !bucket.is_empty()
        {
            self.storage.bucket = bucket;
        }

        if let Ok(language) = std::env::var("CALLSCRIBE_LANGUAGE")
            && !language.is_empty()
        {
            self.transcription.language = language;
        }

        if let Ok(target) = std::env::var("CALLSCRIBE_TRANSLATE_TO")
            && !target.is_empty()
        {
            self.translation.target_language = Some(target);
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/callscribe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("callscribe")
            .join("config.toml")
    }
}
