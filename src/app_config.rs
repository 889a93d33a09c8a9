use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;
use url::Url;

use crate::language_utils;
use crate::retry::{MAX_ATTEMPTS, RetryPolicy};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Narration config
    #[serde(default)]
    pub narration: NarrationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: OpenAI
    OpenAI,
    // @provider: Built-in mock (offline runs and tests)
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }

    // @returns: Default service URL for this provider
    pub fn default_endpoint(&self) -> String {
        match self {
            Self::OpenAI => default_openai_endpoint(),
            Self::Ollama | Self::Mock => default_ollama_endpoint(),
        }
    }

    // @returns: Default model name for this provider
    pub fn default_model(&self) -> String {
        match self {
            Self::OpenAI => "gpt-4o-mini".to_string(),
            Self::Ollama | Self::Mock => default_translation_model(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Narration provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NarrationProvider {
    // @provider: OpenAI audio API
    #[default]
    OpenAI,
    // @provider: Built-in mock
    Mock,
}

impl NarrationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Mock => "Mock",
        }
    }
}

/// Translation settings, including the retry policy bounds
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Provider to translate through
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name
    #[serde(default = "default_translation_model")]
    pub model: String,

    /// Service URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// API key (remote providers only)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Maximum translation attempts, in [1, 3]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit in milliseconds; the wait after failed attempt N is
    /// N times this value
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    /// Retry policy derived from the configured bounds
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.backoff_unit_ms),
        )
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_translation_model(),
            endpoint: default_ollama_endpoint(),
            api_key: String::new(),
            max_attempts: default_max_attempts(),
            backoff_unit_ms: default_backoff_unit_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Narration settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NarrationConfig {
    /// Whether to synthesize narration audio at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Provider to synthesize through
    #[serde(default)]
    pub provider: NarrationProvider,

    /// Speech model name
    #[serde(default = "default_speech_model")]
    pub model: String,

    /// Voice name
    #[serde(default = "default_voice")]
    pub voice: String,

    /// BCP-47 speech tag; derived from the target language when empty
    #[serde(default = "String::new")]
    pub speech_language: String,

    /// Maximum synthesis attempts; 1 means no retry
    #[serde(default = "default_narration_attempts")]
    pub max_attempts: u32,

    /// Service URL
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    /// API key (remote providers only)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl NarrationConfig {
    /// Retry policy for synthesis calls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(1000))
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            provider: NarrationProvider::default(),
            model: default_speech_model(),
            voice: default_voice(),
            speech_language: String::new(),
            max_attempts: default_narration_attempts(),
            endpoint: default_openai_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log level setting
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: "en".to_string(),
            target_language: "ru".to_string(),
            translation: TranslationConfig::default(),
            narration: NarrationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// Attempt counts of zero are rejected here; values above the ceiling
    /// are left to the retry policy, which clamps them with a warning.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        language_utils::validate_language_code(&self.source_language)?;
        language_utils::validate_language_code(&self.target_language)?;

        if self.translation.max_attempts == 0 {
            return Err(anyhow!(
                "translation.max_attempts must be between 1 and {}",
                MAX_ATTEMPTS
            ));
        }
        if self.narration.max_attempts == 0 {
            return Err(anyhow!(
                "narration.max_attempts must be between 1 and {}",
                MAX_ATTEMPTS
            ));
        }

        if self.translation.endpoint.trim().is_empty() {
            return Err(anyhow!("translation.endpoint must not be empty"));
        }
        let endpoint = normalize_endpoint(&self.translation.endpoint);
        Url::parse(&endpoint)
            .map_err(|e| anyhow!("Invalid translation endpoint '{}': {}", endpoint, e))?;

        if self.translation.provider == TranslationProvider::OpenAI
            && self.translation.api_key.trim().is_empty()
        {
            return Err(anyhow!("The OpenAI translation provider requires an API key"));
        }

        if self.narration.enabled
            && self.narration.provider == NarrationProvider::OpenAI
            && self.narration.api_key.trim().is_empty()
        {
            return Err(anyhow!("The OpenAI narration provider requires an API key"));
        }

        Ok(())
    }

    /// BCP-47 tag to synthesize speech in: the configured override, or a tag
    /// derived from the target language ("ru" gives "ru-RU")
    pub fn speech_language_tag(&self) -> String {
        if self.narration.speech_language.trim().is_empty() {
            language_utils::speech_tag(&self.target_language)
        } else {
            self.narration.speech_language.trim().to_string()
        }
    }
}

/// Prefix bare host:port endpoints with a scheme so they parse as URLs
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

// Default value functions for serde
fn default_translation_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

fn default_narration_attempts() -> u32 {
    1
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}
