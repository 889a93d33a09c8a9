/*!
 * Provider implementations for the external translation and speech
 * capabilities.
 *
 * This module contains client implementations for the services the pipeline
 * delegates to:
 * - Ollama: translation via a local LLM server
 * - OpenAI: translation via chat completions and speech via the audio API
 * - Mock: deterministic and flaky stand-ins for tests and offline runs
 *
 * Providers make exactly one external call per invocation; retry lives in
 * the orchestrator, never inside a provider.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::narration::AudioClip;

/// One translation request handed to a provider.
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// ISO 639 code of the source language
    pub source_language: String,
    /// ISO 639 code of the target language
    pub target_language: String,
}

impl TranslateRequest {
    /// Build a request for a language pair
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Common trait for translation providers.
///
/// Implementations can be swapped without touching orchestration logic.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate the request text. One invocation is one attempt.
    ///
    /// # Arguments
    /// * `request` - The text and language pair to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}

/// Common trait for speech synthesis providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize speech for `text` in the BCP-47 `language_tag`.
    ///
    /// # Returns
    /// * `Result<AudioClip, ProviderError>` - Audio bytes plus MIME type
    async fn synthesize(&self, text: &str, language_tag: &str)
        -> Result<AudioClip, ProviderError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}

pub mod mock;
pub mod ollama;
pub mod openai;
