/*!
 * Narration step: speech synthesis for translated text.
 *
 * The service delegates entirely to a pluggable [`SpeechSynthesizer`]
 * provider and returns a caller-owned [`AudioHandle`] into the shared
 * [`AudioStore`]. Synthesis runs under the same generic retry policy as
 * translation; by default it gets a single attempt.
 */

use std::sync::Arc;

use log::debug;

use crate::errors::{NarrationError, RetryError};
use crate::providers::SpeechSynthesizer;
use crate::retry::{self, RetryPolicy};

pub mod audio;

pub use audio::{AudioClip, AudioHandle, AudioStore};

/// Speech synthesis service wrapping a provider.
#[derive(Debug, Clone)]
pub struct NarrationService {
    provider: Arc<dyn SpeechSynthesizer>,
    policy: RetryPolicy,
    language_tag: String,
    store: Arc<AudioStore>,
}

impl NarrationService {
    /// Create a service speaking `language_tag` (a BCP-47 tag such as
    /// `ru-RU`) and registering clips in `store`. Synthesis gets one
    /// attempt unless a different policy is set.
    pub fn new(
        provider: Arc<dyn SpeechSynthesizer>,
        language_tag: impl Into<String>,
        store: Arc<AudioStore>,
    ) -> Self {
        Self {
            provider,
            policy: RetryPolicy::single(),
            language_tag: language_tag.into(),
            store,
        }
    }

    /// Override the retry policy for synthesis calls
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Language tag used for synthesis
    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    /// Store the returned handles point into
    pub fn store(&self) -> &Arc<AudioStore> {
        &self.store
    }

    /// Synthesize speech for `text` and return the handle to the clip.
    ///
    /// Ownership of the audio transfers to the caller with the handle;
    /// the caller releases it once the audio has been played or written out.
    pub async fn narrate(&self, text: &str) -> Result<AudioHandle, NarrationError> {
        let provider = &self.provider;
        let language_tag = self.language_tag.as_str();

        let (clip, attempts) =
            retry::with_retry("speech synthesis", self.policy, |attempt| async move {
                debug!(
                    "speech synthesis attempt {} via {} ({} chars, {})",
                    attempt,
                    provider.name(),
                    text.len(),
                    language_tag
                );
                provider.synthesize(text, language_tag).await
            })
            .await
            .map_err(|e| match e {
                RetryError::Exhausted {
                    attempts,
                    last_error,
                    ..
                } => NarrationError::SynthesisFailed {
                    attempts,
                    reason: last_error.to_string(),
                },
            })?;

        if clip.is_empty() {
            return Err(NarrationError::EmptyAudio);
        }

        debug!(
            "synthesized {} bytes of {} audio in {} attempt(s)",
            clip.len(),
            clip.mime_type,
            attempts
        );

        Ok(self.store.register(clip))
    }
}
