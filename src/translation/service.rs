use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ProviderError, RetryError};
use crate::providers::{TranslateRequest, Translator};
use crate::retry::{self, RetryPolicy};

/// A successful orchestrator run: the translated text plus the number of
/// provider attempts it took to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    /// The translated text
    pub text: String,
    /// Attempts made, 1-based
    pub attempts: u32,
}

/// Translation service driving a provider through the retry policy.
///
/// The provider performs single attempts; this service decides how many are
/// allowed and how long to wait between them. Empty input is passed through
/// untouched - validating it is the caller's job.
#[derive(Debug, Clone)]
pub struct TranslationService {
    provider: Arc<dyn Translator>,
    policy: RetryPolicy,
    source_language: String,
    target_language: String,
}

impl TranslationService {
    /// Create a service for a language pair with the default retry policy
    pub fn new(
        provider: Arc<dyn Translator>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The retry policy in effect
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Test the connection to the underlying provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate `text`, retrying failed attempts per the policy.
    ///
    /// Stops at the first success; a provider answer that cleans down to an
    /// empty string counts as a failed attempt.
    pub async fn translate_with_retry(&self, text: &str) -> Result<Translated, RetryError> {
        self.translate_with_retry_observed(text, |_| {}).await
    }

    /// Like [`translate_with_retry`](Self::translate_with_retry), invoking
    /// `on_attempt` with the attempt number before each provider call.
    pub async fn translate_with_retry_observed(
        &self,
        text: &str,
        mut on_attempt: impl FnMut(u32),
    ) -> Result<Translated, RetryError> {
        let request = TranslateRequest::new(
            text,
            self.source_language.clone(),
            self.target_language.clone(),
        );
        let provider = &self.provider;

        let (translated, attempts) = retry::with_retry("translation", self.policy, |attempt| {
            on_attempt(attempt);
            let request = &request;
            async move {
                debug!(
                    "translation attempt {} via {} ({} chars)",
                    attempt,
                    provider.name(),
                    request.text.len()
                );

                let raw = provider.translate(request).await?;
                let cleaned = clean_translation_response(&raw);
                if cleaned.is_empty() {
                    return Err(ProviderError::EmptyResponse);
                }
                Ok(cleaned)
            }
        })
        .await?;

        Ok(Translated {
            text: translated,
            attempts,
        })
    }
}

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json|text)?\s*\n([\s\S]*?)\n\s*```").unwrap_or_else(|_| {
        // Fallback to a simpler pattern if the main one fails to compile
        Regex::new(r"```([\s\S]*?)```").unwrap()
    })
});

/// Extract the translated text from a raw provider response.
///
/// LLM-backed providers sometimes wrap the answer in a code fence or prefix
/// it with commentary; strip both and return the bare translation.
pub fn clean_translation_response(response: &str) -> String {
    let trimmed = response.trim();

    // Quick check for pure text (most common case)
    if !trimmed.contains("```") && !trimmed.lines().any(is_commentary_line) {
        return trimmed.to_string();
    }

    let body = if let Some(caps) = CODE_FENCE.captures(trimmed) {
        caps.get(1).map_or(trimmed, |m| m.as_str())
    } else {
        trimmed
    };

    body.lines()
        .filter(|line| !is_commentary_line(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Commentary lines LLMs like to wrap translations in
fn is_commentary_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("Here's the translation")
        || line.starts_with("Here is the translation")
        || line.starts_with("I've translated")
        || line.starts_with("Translation:")
        || line.starts_with("Please note")
}
