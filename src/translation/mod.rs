/*!
 * Retry orchestrator for translation.
 *
 * The service wraps a pluggable translation provider and drives it through
 * the bounded retry policy; the response cleanup helpers live here too.
 */

// Re-export main types for easier usage
pub use self::service::{Translated, TranslationService, clean_translation_response};

// Submodules
pub mod service;
