use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::narration::AudioClip;
use crate::providers::{SpeechSynthesizer, TranslateRequest, Translator};

/// OpenAI client for translation via chat completions
#[derive(Debug)]
pub struct OpenAI {
    /// API key for authentication
    api_key: String,
    /// Base URL of the API, e.g. `https://api.openai.com/v1`
    base_url: String,
    /// Model name to use for completions
    model: String,
    /// HTTP client for making requests
    client: Client,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    role: String,
    /// Content of the message
    content: String,
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model name
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    temperature: f32,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices
    choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The completion message
    message: ChatMessage,
}

/// Speech synthesis request for the audio API
#[derive(Debug, Serialize)]
struct SpeechRequest {
    /// Model name, e.g. `tts-1`
    model: String,
    /// Text to synthesize
    input: String,
    /// Voice to use
    voice: String,
}

fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());

    if status.as_u16() == 401 {
        ProviderError::AuthenticationError(message)
    } else {
        ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        }
    }
}

impl OpenAI {
    /// Create a translation client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            client: build_client(timeout_secs),
        }
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to reach OpenAI API: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json::<ChatResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse OpenAI response: {}", e))
        })
    }
}

#[async_trait]
impl Translator for OpenAI {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let source = language_utils::get_language_name(&request.source_language)
            .unwrap_or_else(|_| request.source_language.clone());
        let target = language_utils::get_language_name(&request.target_language)
            .unwrap_or_else(|_| request.target_language.clone());

        let chat = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: format!(
                        "You are a translation expert. You will receive {} text and translate \
                         it to {}. Return only the translated text, without commentary.",
                        source, target
                    ),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.text.clone(),
                },
            ],
            temperature: 0.3,
        };

        let response = self.complete(chat).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(choice.message.content)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to connect to OpenAI: {}", e))
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// OpenAI speech client for the `/audio/speech` endpoint.
///
/// The voice carries the accent; the language tag is implied by the input
/// text, so it is accepted for interface compatibility but not sent.
#[derive(Debug)]
pub struct OpenAiSpeech {
    /// API key for authentication
    api_key: String,
    /// Base URL of the API
    base_url: String,
    /// Speech model, e.g. `tts-1`
    model: String,
    /// Voice name, e.g. `alloy`
    voice: String,
    /// HTTP client for making requests
    client: Client,
}

impl OpenAiSpeech {
    /// Create a speech synthesis client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            voice: voice.into(),
            client: build_client(timeout_secs),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(
        &self,
        text: &str,
        _language_tag: &str,
    ) -> Result<AudioClip, ProviderError> {
        let url = format!("{}/audio/speech", self.base_url);

        let request = SpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to reach OpenAI audio API: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to read audio response body: {}", e))
        })?;

        Ok(AudioClip::new(bytes, mime_type))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
