use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{TranslateRequest, Translator};

/// Ollama client for translating through a local LLM server
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// Model name to use for generation
    model: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize)]
struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    /// Generated text
    response: String,
    /// Whether the generation is complete
    #[serde(default)]
    #[allow(dead_code)]
    done: bool,
}

impl Ollama {
    /// Create a client from an endpoint string like `http://localhost:11434`.
    /// A missing scheme is assumed to be plain HTTP.
    pub fn from_endpoint(
        endpoint: &str,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let url_str = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("http://{}", endpoint)
        };

        let url = Url::parse(&url_str).map_err(|e| {
            ProviderError::RequestFailed(format!("Invalid Ollama endpoint '{}': {}", endpoint, e))
        })?;

        let host = format!(
            "{}://{}",
            url.scheme(),
            url.host_str().unwrap_or("localhost")
        );
        let port = url.port().unwrap_or(11434);

        Ok(Self {
            base_url: format!("{}:{}", host, port),
            model: model.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        })
    }

    /// Send one generation request. No retry here; the orchestrator owns that.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("Failed to reach Ollama API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to read Ollama response body: {}", e))
        })?;

        // Single JSON object is the normal non-streaming shape
        if let Ok(parsed) = serde_json::from_str::<GenerationResponse>(&response_text) {
            return Ok(parsed.response);
        }

        // Some server versions answer in JSONL even with stream=false;
        // concatenate the response fragments line by line.
        let mut full_response = String::new();
        let mut parsed_any = false;
        for line in response_text.lines().filter(|l| !l.trim().is_empty()) {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(line) {
                parsed_any = true;
                if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
                    full_response.push_str(part);
                }
            }
        }

        if parsed_any {
            Ok(full_response)
        } else {
            Err(ProviderError::ParseError(format!(
                "Ollama response contains invalid JSON (first 200 chars): {}",
                response_text.chars().take(200).collect::<String>()
            )))
        }
    }
}

#[async_trait]
impl Translator for Ollama {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let source = language_utils::get_language_name(&request.source_language)
            .unwrap_or_else(|_| request.source_language.clone());
        let target = language_utils::get_language_name(&request.target_language)
            .unwrap_or_else(|_| request.target_language.clone());

        let system_prompt = format!(
            "You are a translation expert. You will receive {} text and translate it to {}. \
             Return only the translated text, without commentary.",
            source, target
        );
        let user_prompt = format!(
            "Translate the following {} text to {}:\n\n{}",
            source, target, request.text
        );

        let generation = GenerationRequest {
            model: self.model.clone(),
            prompt: user_prompt,
            system: Some(system_prompt),
            options: Some(GenerationOptions {
                temperature: Some(0.3),
            }),
            stream: false,
        };

        self.generate(generation).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/version", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ProviderError::RequestFailed(format!("Failed to connect to Ollama: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "Ollama version endpoint returned an error".to_string(),
            })
        }
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
