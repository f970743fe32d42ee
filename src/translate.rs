//! Machine-translation service client.
//!
//! Optionally translates the assembled transcript into a target language.
//! Translation is skipped when the target matches the transcription source
//! language; that decision lives in [`should_translate`] so the workflow and
//! the CLI agree on it.

use crate::error::{CallscribeError, Result};
use serde::{Deserialize, Serialize};

/// Trait for the remote translation service.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang` (bare codes,
    /// e.g. "es" → "en").
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String>;
}

/// Reduce a transcription language code to its bare language part
/// ("es-US" → "es").
pub fn source_language(transcription_language: &str) -> &str {
    transcription_language
        .split('-')
        .next()
        .unwrap_or(transcription_language)
}

/// Whether a translation pass should run at all.
///
/// No target configured, or a target equal to the source language, means the
/// transcript is already in the language the operator wants.
pub fn should_translate(transcription_language: &str, target: Option<&str>) -> bool {
    match target {
        Some(target) => source_language(transcription_language) != target,
        None => false,
    }
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

/// HTTP client for the translation service.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let body = TranslateBody {
            text,
            source_language_code: source_lang,
            target_language_code: target_lang,
        };

        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| CallscribeError::Translation {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CallscribeError::Translation {
                message: format!("status {}", response.status()),
            });
        }

        let parsed: TranslateResponse =
            response
                .json()
                .await
                .map_err(|e| CallscribeError::Translation {
                    message: format!("unreadable response: {e}"),
                })?;
        Ok(parsed.translated_text)
    }
}

/// Mock translator for testing.
pub struct MockTranslator {
    should_fail: bool,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    /// Configure the mock to fail on translate.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        if self.should_fail {
            return Err(CallscribeError::Translation {
                message: "mock translation failure".to_string(),
            });
        }
        Ok(format!("[{source_lang}->{target_lang}] {text}"))
    }
}
