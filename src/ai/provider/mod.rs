//! Text Provider Abstraction
//!
//! Defines the `TextProvider` trait for free-text generation. Provider
//! failures come back as classified `ProviderError`s so the generation
//! client can decide whether its single reduced-budget fallback applies.

mod cohere;

pub use cohere::CohereProvider;

// Re-export error types from centralized location
pub use crate::types::{ErrorCategory, ErrorClassifier, ProviderError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::Result;

// =============================================================================
// Request / Response
// =============================================================================

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Maximum output tokens
    pub max_tokens: u32,
    /// Generation temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Nucleus sampling value
    pub top_p: f32,
    /// Frequency penalty
    pub frequency_penalty: f32,
    /// Presence penalty
    pub presence_penalty: f32,
}

/// One generation request: a fixed instruction, the text to process, and the
/// sampling parameters chosen by the client.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Fixed instruction template defining the role
    pub instruction: String,
    /// Text for the role to process
    pub input: String,
    /// Sampling parameters
    pub params: SamplingParams,
}

impl GenerationRequest {
    /// Combined prompt sent to the provider: instruction, delimited input,
    /// and a response cue.
    pub fn combined_prompt(&self) -> String {
        format!(
            "{}\n\n---\n\nTEXT TO PROCESS:\n{}\n\n---\n\nRESPONSE:",
            self.instruction, self.input
        )
    }
}

/// Successful generation result
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Generated text, trimmed
    pub text: String,
    /// Output tokens billed, when the provider reports them
    pub output_tokens: Option<u32>,
}

/// Shared provider handle passed into the generation client
pub type SharedProvider = Arc<dyn TextProvider + Send + Sync>;

// =============================================================================
// Text Provider Trait
// =============================================================================

/// Free-text generation provider.
///
/// One outbound request per call; the call blocks until the provider responds
/// or its timeout fires. No caching, no rate limiting.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for the given request
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;
}
