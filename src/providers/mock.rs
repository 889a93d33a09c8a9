/*!
 * Mock provider implementations for testing and offline runs.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with translated text
 * - `MockTranslator::flaky()` - Fails with a configurable probability
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::narration::AudioClip;
use crate::providers::{SpeechSynthesizer, TranslateRequest, Translator};

/// Behavior mode for the mock providers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an error
    Failing,
    /// Fails the first N requests, then succeeds
    FailFirst {
        /// Number of leading requests to fail
        failures: usize,
    },
    /// Fails each request independently with the given probability
    Flaky {
        /// Probability in [0, 1] that a request fails
        failure_rate: f64,
    },
    /// Returns an empty response
    Empty,
    /// Simulates a slow response (for timeout testing)
    Slow {
        /// Delay before answering
        delay_ms: u64,
    },
}

/// Mock translation provider
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails the first `failures` requests
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create a mock that fails each request with probability `failure_rate`
    pub fn flaky(failure_rate: f64) -> Self {
        Self::new(MockBehavior::Flaky { failure_rate })
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms` milliseconds
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(format!("Translated: {}", request.text)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Translation failed.".to_string(),
            }),

            MockBehavior::FailFirst { failures } => {
                if count < failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated transient failure (request #{})", count + 1),
                    })
                } else {
                    Ok(format!("Translated: {}", request.text))
                }
            }

            MockBehavior::Flaky { failure_rate } => {
                if rand::random::<f64>() < failure_rate {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: "Translation failed.".to_string(),
                    })
                } else {
                    Ok(format!("Translated: {}", request.text))
                }
            }

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(format!("Translated: {}", request.text))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Mock speech synthesis provider.
///
/// Successful synthesis returns the fixed byte pattern `[1, 2, 3]` as
/// `audio/mpeg`, enough to exercise handle ownership and file writing.
#[derive(Debug)]
pub struct MockSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails the first `failures` requests
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create a mock that returns a clip with no audio bytes
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of synthesize calls made so far
    pub fn calls(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn fixed_clip() -> AudioClip {
        AudioClip::new(vec![1u8, 2, 3], "audio/mpeg")
    }
}

impl Clone for MockSynthesizer {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        _language_tag: &str,
    ) -> Result<AudioClip, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::fixed_clip()),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Speech synthesis failed.".to_string(),
            }),

            MockBehavior::FailFirst { failures } => {
                if count < failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated transient failure (request #{})", count + 1),
                    })
                } else {
                    Ok(Self::fixed_clip())
                }
            }

            MockBehavior::Flaky { failure_rate } => {
                if rand::random::<f64>() < failure_rate {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: "Speech synthesis failed.".to_string(),
                    })
                } else {
                    Ok(Self::fixed_clip())
                }
            }

            MockBehavior::Empty => Ok(AudioClip::new(Vec::<u8>::new(), "audio/mpeg")),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::fixed_clip())
            }
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
