/*!
 * Pipeline composing the retry orchestrator with the narration step.
 *
 * Control flow is linear: translate with retry, then narrate the translated
 * text. A translation failure short-circuits the run; a narration failure
 * still surfaces the translated text, since that part of the work is done.
 */

use log::info;

use crate::errors::{PipelineError, RetryError};
use crate::narration::{AudioHandle, NarrationService};
use crate::translation::TranslationService;

/// Phase of a pipeline run, for progress reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// The retry orchestrator is calling the translation provider
    Translating,
    /// Translation succeeded; speech synthesis is running
    Narrating,
    /// The run finished successfully
    Done,
}

/// Progress information during pipeline execution.
///
/// Percentages step through thirds: a run that skips narration jumps from
/// the translation phase straight to done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineProgress {
    /// Current phase
    pub phase: PipelinePhase,
    /// Current translation attempt (0 outside the translation phase)
    pub attempt: u32,
    /// Maximum attempts the policy allows
    pub max_attempts: u32,
    /// Overall progress (0.0 - 100.0)
    pub percent: f32,
}

impl PipelineProgress {
    fn translating(attempt: u32, max_attempts: u32) -> Self {
        Self {
            phase: PipelinePhase::Translating,
            attempt,
            max_attempts,
            percent: 33.3,
        }
    }

    fn narrating(max_attempts: u32) -> Self {
        Self {
            phase: PipelinePhase::Narrating,
            attempt: 0,
            max_attempts,
            percent: 66.7,
        }
    }

    fn done(max_attempts: u32) -> Self {
        Self {
            phase: PipelinePhase::Done,
            attempt: 0,
            max_attempts,
            percent: 100.0,
        }
    }
}

/// Result of a successful pipeline run.
///
/// Only constructible from a successful translation; `audio` is `None` only
/// when narration is disabled, never on a narration failure (that path is
/// [`PipelineError::Narration`]).
#[derive(Debug, Clone)]
pub struct TranslationResult {
    /// The translated text
    pub translated_text: String,
    /// Translation attempts it took
    pub attempts: u32,
    /// Handle to the narration audio, owned by the caller
    pub audio: Option<AudioHandle>,
}

/// The composed translate-then-narrate pipeline
#[derive(Debug, Clone)]
pub struct TranslationPipeline {
    translator: TranslationService,
    narrator: Option<NarrationService>,
}

impl TranslationPipeline {
    /// Compose a pipeline. Pass `None` for `narrator` to skip narration.
    pub fn new(translator: TranslationService, narrator: Option<NarrationService>) -> Self {
        Self {
            translator,
            narrator,
        }
    }

    /// Run the pipeline without progress reporting
    pub async fn run(&self, source_text: &str) -> Result<TranslationResult, PipelineError> {
        self.run_with_progress(source_text, |_| {}).await
    }

    /// Run the pipeline, reporting phase transitions and translation
    /// attempts through `progress`.
    pub async fn run_with_progress(
        &self,
        source_text: &str,
        mut progress: impl FnMut(PipelineProgress),
    ) -> Result<TranslationResult, PipelineError> {
        let max_attempts = self.translator.policy().max_attempts();

        let translated = self
            .translator
            .translate_with_retry_observed(source_text, |attempt| {
                progress(PipelineProgress::translating(attempt, max_attempts));
            })
            .await
            .map_err(|e| match e {
                RetryError::Exhausted {
                    attempts,
                    last_error,
                    ..
                } => PipelineError::Translation {
                    attempts,
                    reason: last_error.to_string(),
                },
            })?;

        info!(
            "translation succeeded after {} attempt(s) ({} chars)",
            translated.attempts,
            translated.text.len()
        );

        let audio = match &self.narrator {
            Some(narrator) => {
                progress(PipelineProgress::narrating(max_attempts));
                match narrator.narrate(&translated.text).await {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        return Err(PipelineError::Narration {
                            translated_text: translated.text,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            None => None,
        };

        progress(PipelineProgress::done(max_attempts));

        Ok(TranslationResult {
            translated_text: translated.text,
            attempts: translated.attempts,
            audio,
        })
    }
}
