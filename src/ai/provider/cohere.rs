//! Cohere API Provider
//!
//! Text provider using Cohere's generate endpoint. HTTP failures are
//! classified into `ProviderError` categories before they leave this module.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{GenerationOutput, GenerationRequest, TextProvider};
use crate::config::ProviderConfig;
use crate::types::{ErrorCategory, ErrorClassifier, ProviderError, Result, WebloomError};

const DEFAULT_API_BASE: &str = "https://api.cohere.com";
const PROVIDER_NAME: &str = "cohere";

/// Cohere generate-endpoint provider with secure API key handling
pub struct CohereProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for CohereProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CohereProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl CohereProvider {
    pub fn new(config: &ProviderConfig, api_key: SecretString) -> Result<Self> {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                WebloomError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            api_base,
            model: config.model.clone(),
            client,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: request.combined_prompt(),
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
            p: request.params.top_p,
            frequency_penalty: request.params.frequency_penalty,
            presence_penalty: request.params.presence_penalty,
        }
    }
}

#[async_trait]
impl TextProvider for CohereProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        debug!(
            model = %self.model,
            input_chars = request.input.len(),
            max_tokens = request.params.max_tokens,
            "Sending generate request to Cohere"
        );

        let body = self.build_request(request);
        let url = format!("{}/v1/generate", self.api_base);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("request timed out: {e}")
                } else if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    format!("network error: {e}")
                };
                WebloomError::Provider(ErrorClassifier::classify(&message, PROVIDER_NAME))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WebloomError::Provider(ErrorClassifier::classify_http_status(
                status,
                &body,
                PROVIDER_NAME,
            )));
        }

        let response_body: GenerateResponse = response.json().await.map_err(|e| {
            WebloomError::Provider(ProviderError::with_provider(
                ErrorCategory::Unknown,
                format!("failed to parse Cohere response: {e}"),
                PROVIDER_NAME,
            ))
        })?;

        let text = response_body
            .generations
            .first()
            .map(|g| g.text.trim().to_string())
            .ok_or_else(|| {
                WebloomError::Provider(ProviderError::with_provider(
                    ErrorCategory::Unknown,
                    "no generations in Cohere response",
                    PROVIDER_NAME,
                ))
            })?;

        let output_tokens = response_body
            .meta
            .and_then(|m| m.billed_units)
            .and_then(|u| u.output_tokens);

        Ok(GenerationOutput {
            text,
            output_tokens,
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Cohere API is available");
                Ok(true)
            }
            Ok(resp) => {
                warn!("Cohere API check failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Cohere API check failed: {}", e);
                Ok(false)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
    p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
    #[serde(default)]
    meta: Option<ResponseMeta>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ResponseMeta {
    #[serde(default)]
    billed_units: Option<BilledUnits>,
}

#[derive(Debug, Deserialize)]
struct BilledUnits {
    #[serde(default)]
    output_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::SamplingParams;

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = CohereProvider::new(
            &ProviderConfig::default(),
            SecretString::from("sk-secret".to_string()),
        )
        .unwrap();
        let debug = format!("{:?}", provider);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_build_request_carries_sampling_params() {
        let provider = CohereProvider::new(
            &ProviderConfig::default(),
            SecretString::from("k".to_string()),
        )
        .unwrap();

        let request = GenerationRequest {
            instruction: "You summarize.".to_string(),
            input: "Some text".to_string(),
            params: SamplingParams {
                max_tokens: 321,
                temperature: 0.5,
                top_p: 0.85,
                frequency_penalty: 0.15,
                presence_penalty: 0.15,
            },
        };

        let body = provider.build_request(&request);
        assert_eq!(body.max_tokens, 321);
        assert_eq!(body.temperature, 0.5);
        assert!(body.prompt.contains("You summarize."));
        assert!(body.prompt.contains("TEXT TO PROCESS:\nSome text"));
    }
}
