use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{Config, NarrationProvider, TranslationProvider};
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::narration::{AudioStore, NarrationService};
use crate::pipeline::{PipelinePhase, PipelineProgress, TranslationPipeline};
use crate::providers::mock::{MockSynthesizer, MockTranslator};
use crate::providers::ollama::Ollama;
use crate::providers::openai::{OpenAI, OpenAiSpeech};
use crate::providers::{SpeechSynthesizer, Translator};
use crate::translation::TranslationService;

// @module: Application controller for file translation

/// Main application controller for translating text files
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn build_translator(&self) -> Result<Arc<dyn Translator>> {
        let translation = &self.config.translation;

        let translator: Arc<dyn Translator> = match translation.provider {
            TranslationProvider::Ollama => Arc::new(Ollama::from_endpoint(
                &translation.endpoint,
                &translation.model,
                translation.timeout_secs,
            )?),
            TranslationProvider::OpenAI => Arc::new(OpenAI::new(
                &translation.api_key,
                &translation.endpoint,
                &translation.model,
                translation.timeout_secs,
            )),
            TranslationProvider::Mock => Arc::new(MockTranslator::working()),
        };

        Ok(translator)
    }

    fn build_synthesizer(&self) -> Arc<dyn SpeechSynthesizer> {
        let narration = &self.config.narration;

        match narration.provider {
            NarrationProvider::OpenAI => Arc::new(OpenAiSpeech::new(
                &narration.api_key,
                &narration.endpoint,
                &narration.model,
                &narration.voice,
                narration.timeout_secs,
            )),
            NarrationProvider::Mock => Arc::new(MockSynthesizer::working()),
        }
    }

    /// Assemble the pipeline from the configuration, registering narration
    /// audio in `store`
    pub fn build_pipeline(&self, store: Arc<AudioStore>) -> Result<TranslationPipeline> {
        let translator = TranslationService::new(
            self.build_translator()?,
            self.config.source_language.clone(),
            self.config.target_language.clone(),
        )
        .with_policy(self.config.translation.retry_policy());

        let narrator = if self.config.narration.enabled {
            Some(
                NarrationService::new(
                    self.build_synthesizer(),
                    self.config.speech_language_tag(),
                    store,
                )
                .with_policy(self.config.narration.retry_policy()),
            )
        } else {
            None
        };

        Ok(TranslationPipeline::new(translator, narrator))
    }

    /// Run the main workflow for a single input file
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input file exists
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Check if a translation already exists
        let text_output = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
            "txt",
        );
        if text_output.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Read the source text; the pipeline expects non-empty input
        let source_text = FileManager::read_to_string(&input_file)?;
        if source_text.trim().is_empty() {
            return Err(anyhow!("Input file is empty: {:?}", input_file));
        }

        let store = Arc::new(AudioStore::new());
        let pipeline = self.build_pipeline(Arc::clone(&store))?;

        let progress_bar = ProgressBar::new(100);
        progress_bar.set_style(
            ProgressStyle::with_template("[{bar:30.cyan/blue}] {percent:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let outcome = pipeline
            .run_with_progress(source_text.trim(), |p: PipelineProgress| {
                progress_bar.set_position(p.percent as u64);
                progress_bar.set_message(match p.phase {
                    PipelinePhase::Translating => {
                        format!("translating (attempt {}/{})", p.attempt, p.max_attempts)
                    }
                    PipelinePhase::Narrating => "narrating".to_string(),
                    PipelinePhase::Done => "done".to_string(),
                });
            })
            .await;

        progress_bar.finish_and_clear();

        match outcome {
            Ok(result) => {
                FileManager::write_to_file(&text_output, &result.translated_text)?;
                info!(
                    "Translated {:?} in {} attempt(s): {:?}",
                    input_file, result.attempts, text_output
                );

                if let Some(handle) = &result.audio {
                    // Ownership of the clip transfers here; taking it also
                    // revokes the handle.
                    let clip = store
                        .take(handle)
                        .ok_or_else(|| anyhow!("Narration audio was already released"))?;
                    let audio_output = FileManager::generate_output_path(
                        &input_file,
                        &output_dir,
                        &self.config.target_language,
                        clip.file_extension(),
                    );
                    FileManager::write_bytes(&audio_output, &clip.bytes)?;
                    info!(
                        "Narration audio ({} bytes): {:?}",
                        clip.len(),
                        audio_output
                    );
                }

                info!(
                    "Completed in {}",
                    Self::format_duration(start_time.elapsed())
                );
                Ok(())
            }
            Err(PipelineError::Narration {
                translated_text,
                reason,
            }) => {
                // The translation itself succeeded; keep it even though the
                // narration step failed.
                FileManager::write_to_file(&text_output, &translated_text)?;
                warn!(
                    "Narration failed, translated text was still saved to {:?}",
                    text_output
                );
                Err(anyhow!("Narration failed: {}", reason))
            }
            Err(e @ PipelineError::Translation { .. }) => {
                error!("{}", e);
                Err(anyhow!(e))
            }
        }
    }

    /// Run the workflow for every text file in a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Processing text files in directory: {:?}", input_dir);

        let files = FileManager::find_files(&input_dir, "txt")?;
        if files.is_empty() {
            warn!("No text files found in directory: {:?}", input_dir);
            return Ok(());
        }

        let mut processed_count = 0;
        for file in files {
            // Skip files this run produced itself
            if Self::is_translation_output(&file, &self.config.target_language) {
                continue;
            }

            info!("Processing file: {:?}", file);

            let output_dir = file
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| input_dir.clone());

            if let Err(e) = self.run(file.clone(), output_dir, force_overwrite).await {
                error!("Error processing file {:?}: {}", file, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} file(s)", processed_count);

        Ok(())
    }

    // @checks: Whether a path looks like an output of a previous run
    fn is_translation_output(path: &std::path::Path, target_language: &str) -> bool {
        path.file_stem()
            .map(|stem| {
                stem.to_string_lossy()
                    .ends_with(&format!(".{}", target_language))
            })
            .unwrap_or(false)
    }

    // @formats: Duration as a short human-readable string
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
