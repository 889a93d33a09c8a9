/*!
 * # Voxlate - Text file translation with AI narration
 *
 * A Rust library for translating text files between languages and reading
 * the result aloud.
 *
 * ## Features
 *
 * - Translate plain-text files using pluggable providers:
 *   - Ollama (local LLM)
 *   - OpenAI API
 *   - Built-in mock (offline runs and tests)
 * - Bounded retry with linear backoff around every external call
 * - Optional speech narration of the translated text, handed back as a
 *   revocable audio handle
 * - Batch processing of whole directories
 * - ISO 639 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `retry`: Generic bounded retry policy with linear backoff
 * - `translation`: Retry orchestrator around the translation provider
 * - `narration`: Speech synthesis step and the audio handle registry
 * - `pipeline`: Composition of translation and narration
 * - `providers`: Client implementations for the external capabilities:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::openai`: OpenAI API clients (chat and speech)
 *   - `providers::mock`: Deterministic and flaky stand-ins
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod narration;
pub mod pipeline;
pub mod providers;
pub mod retry;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, NarrationError, PipelineError, ProviderError, RetryError};
pub use narration::{AudioClip, AudioHandle, AudioStore, NarrationService};
pub use pipeline::{TranslationPipeline, TranslationResult};
pub use retry::RetryPolicy;
pub use translation::TranslationService;
