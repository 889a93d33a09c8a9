/*!
 * Error types for the voxlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling provider APIs
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider answered but produced nothing usable
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Terminal failure of a retried operation.
///
/// Carries the number of attempts actually made and the error observed on
/// the last one. Intermediate attempt failures are recovered locally by the
/// retry loop and only show up in logs.
#[derive(Error, Debug)]
pub enum RetryError {
    /// All attempts were used up without a success
    #[error("{operation} failed after {attempts} attempt(s): {last_error}")]
    Exhausted {
        /// Human-readable name of the retried operation
        operation: String,
        /// Attempts made before giving up
        attempts: u32,
        /// Failure reported by the final attempt
        last_error: ProviderError,
    },
}

impl RetryError {
    /// Attempts made before the operation was abandoned
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Errors that can occur during speech synthesis
#[derive(Error, Debug)]
pub enum NarrationError {
    /// The synthesizer failed on every allowed attempt
    #[error("speech synthesis failed after {attempts} attempt(s): {reason}")]
    SynthesisFailed {
        /// Attempts made
        attempts: u32,
        /// Failure reported by the final attempt
        reason: String,
    },

    /// The synthesizer reported success but produced no audio bytes
    #[error("synthesizer produced no audio data")]
    EmptyAudio,
}

/// Errors surfaced by a full pipeline run.
///
/// Narration failures keep the translated text: the translation already
/// succeeded at that point and the caller may still want to use or save it.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Translation gave up after exhausting its attempts
    #[error("translation failed after {attempts} attempt(s): {reason}")]
    Translation {
        /// Attempts made by the retry orchestrator
        attempts: u32,
        /// Failure reported by the final attempt
        reason: String,
    },

    /// Translation succeeded but narration did not
    #[error("narration failed: {reason}")]
    Narration {
        /// The successfully translated text
        translated_text: String,
        /// Failure reported by the narration step
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a pipeline run
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
