//! Generation Client
//!
//! Wraps one provider call with size-tiered parameter selection and a single
//! reduced-budget fallback on token/length failures.
//!
//! The client never returns an error to its callers: a failed call (after the
//! one fallback attempt, where applicable) produces a visible error-marker
//! string embedded in the normal output flow. The pipeline thus keeps running
//! on a bad call, trading output quality for liveness.

use tracing::{debug, warn};

use crate::ai::provider::{GenerationRequest, SamplingParams, SharedProvider};
use crate::config::GenerationConfig;
use crate::constants::generation as gen_constants;
use crate::types::WebloomError;

/// Marker appended to input truncated for the fallback attempt
pub const TRUNCATION_MARKER: &str = "\n\n[CONTENT TRUNCATED - PARTIAL ANALYSIS]";

/// Input size tiers for parameter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

/// Client for text generation with tiered parameters and one-shot fallback
pub struct GenerationClient {
    provider: SharedProvider,
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(provider: SharedProvider, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    /// Tier for a given input length
    pub fn tier_for(&self, input_chars: usize) -> SizeTier {
        if input_chars <= self.config.small_threshold {
            SizeTier::Small
        } else if input_chars <= self.config.medium_threshold {
            SizeTier::Medium
        } else {
            SizeTier::Large
        }
    }

    /// Sampling parameters for an input of the given length.
    ///
    /// Temperature weakly decreases and penalties weakly increase as the
    /// tier grows: larger inputs need more deterministic, less repetitive
    /// completions.
    pub fn params_for(&self, input_chars: usize) -> SamplingParams {
        let base_temp = self.config.base_temperature;
        match self.tier_for(input_chars) {
            SizeTier::Small => SamplingParams {
                max_tokens: gen_constants::SMALL_MAX_TOKENS,
                temperature: base_temp + 0.1,
                top_p: gen_constants::DEFAULT_TOP_P,
                frequency_penalty: gen_constants::DEFAULT_FREQUENCY_PENALTY,
                presence_penalty: gen_constants::DEFAULT_PRESENCE_PENALTY,
            },
            SizeTier::Medium => SamplingParams {
                max_tokens: gen_constants::MEDIUM_MAX_TOKENS,
                temperature: base_temp,
                top_p: gen_constants::DEFAULT_TOP_P,
                frequency_penalty: gen_constants::DEFAULT_FREQUENCY_PENALTY,
                presence_penalty: gen_constants::DEFAULT_PRESENCE_PENALTY,
            },
            SizeTier::Large => SamplingParams {
                max_tokens: gen_constants::LARGE_MAX_TOKENS,
                temperature: base_temp - 0.1,
                top_p: gen_constants::DEFAULT_TOP_P - 0.05,
                frequency_penalty: gen_constants::DEFAULT_FREQUENCY_PENALTY + 0.05,
                presence_penalty: gen_constants::DEFAULT_PRESENCE_PENALTY + 0.05,
            },
        }
    }

    /// Generate text for one instruction/input pair.
    ///
    /// `max_output_tokens` overrides the tier's token budget only when the
    /// caller asks for something other than the configured default; roles
    /// that keep the default get the tier budget instead.
    ///
    /// Always returns a string. Provider failures classified as size-related
    /// get exactly one fallback attempt (output budget halved and capped,
    /// input truncated with a marker); anything still failing becomes an
    /// error-marker string.
    pub async fn generate(
        &self,
        instruction: &str,
        input: &str,
        max_output_tokens: u32,
    ) -> String {
        let mut params = self.params_for(input.chars().count());
        if max_output_tokens != self.config.default_output_tokens {
            params.max_tokens = max_output_tokens;
        }

        let request = GenerationRequest {
            instruction: instruction.to_string(),
            input: input.to_string(),
            params,
        };

        match self.provider.generate(&request).await {
            Ok(output) => output.text,
            Err(WebloomError::Provider(err)) if err.is_size_related() => {
                warn!(error = %err, "Size-related generation failure, retrying with reduced budget");
                self.fallback(instruction, input, max_output_tokens).await
            }
            Err(err) => {
                warn!(error = %err, "Generation failed");
                format!("[generation error: {err}]")
            }
        }
    }

    /// The single fallback attempt: half the output budget (capped), truncate
    /// the input, and mark the truncation so readers know the analysis is
    /// partial.
    async fn fallback(&self, instruction: &str, input: &str, max_output_tokens: u32) -> String {
        let fallback_tokens =
            (max_output_tokens / 2).min(gen_constants::FALLBACK_MAX_TOKENS).max(1);

        let truncated: String = if input.chars().count() > gen_constants::FALLBACK_INPUT_CHARS {
            let head: String = input
                .chars()
                .take(gen_constants::FALLBACK_INPUT_CHARS)
                .collect();
            format!("{head}{TRUNCATION_MARKER}")
        } else {
            input.to_string()
        };

        debug!(
            fallback_tokens,
            input_chars = truncated.chars().count(),
            "Issuing fallback generation"
        );

        let request = GenerationRequest {
            instruction: instruction.to_string(),
            input: truncated,
            params: SamplingParams {
                max_tokens: fallback_tokens,
                temperature: self.config.base_temperature,
                top_p: gen_constants::DEFAULT_TOP_P,
                frequency_penalty: gen_constants::DEFAULT_FREQUENCY_PENALTY,
                presence_penalty: gen_constants::DEFAULT_PRESENCE_PENALTY,
            },
        };

        match self.provider.generate(&request).await {
            Ok(output) => output.text,
            Err(err) => {
                warn!(error = %err, "Fallback generation also failed");
                format!("[generation error after fallback: {err}]")
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::provider::{GenerationOutput, TextProvider};
    use crate::types::{ErrorCategory, ProviderError, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Scripted provider: pops one canned response per call and records the
    /// requests it saw.
    pub(crate) struct ScriptedProvider {
        responses: Mutex<Vec<Result<GenerationOutput>>>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(responses: Vec<Result<GenerationOutput>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(text: &str) -> Result<GenerationOutput> {
            Ok(GenerationOutput {
                text: text.to_string(),
                output_tokens: None,
            })
        }

        pub fn err(category: ErrorCategory, message: &str) -> Result<GenerationOutput> {
            Err(ProviderError::with_provider(category, message, "scripted").into())
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextProvider for ScriptedProvider {
        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Self::ok("unscripted"))
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn client_with(provider: Arc<ScriptedProvider>) -> GenerationClient {
        GenerationClient::new(provider, GenerationConfig::default())
    }

    #[test]
    fn test_tier_boundaries() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let client = client_with(provider);
        assert_eq!(client.tier_for(0), SizeTier::Small);
        assert_eq!(client.tier_for(1000), SizeTier::Small);
        assert_eq!(client.tier_for(1001), SizeTier::Medium);
        assert_eq!(client.tier_for(3000), SizeTier::Medium);
        assert_eq!(client.tier_for(3001), SizeTier::Large);
    }

    #[test]
    fn test_params_monotonic_across_tiers() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let client = client_with(provider);

        let small = client.params_for(500);
        let medium = client.params_for(2000);
        let large = client.params_for(5000);

        // Temperature weakly decreases with tier
        assert!(small.temperature >= medium.temperature);
        assert!(medium.temperature >= large.temperature);
        // Penalties weakly increase with tier
        assert!(small.frequency_penalty <= medium.frequency_penalty);
        assert!(medium.frequency_penalty <= large.frequency_penalty);
        assert!(small.presence_penalty <= medium.presence_penalty);
        assert!(medium.presence_penalty <= large.presence_penalty);
    }

    #[tokio::test]
    async fn test_explicit_budget_overrides_tier() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::ok("out")]));
        let client = client_with(provider.clone());

        client.generate("instr", "short input", 600).await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].params.max_tokens, 600);
    }

    #[tokio::test]
    async fn test_default_budget_uses_tier_tokens() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::ok("out")]));
        let client = client_with(provider.clone());

        // 500 is the configured default, so the small tier's 400 applies
        client.generate("instr", "short input", 500).await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].params.max_tokens, 400);
    }

    #[tokio::test]
    async fn test_token_error_triggers_exactly_one_fallback() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedProvider::err(ErrorCategory::TokenLimit, "too many tokens"),
            ScriptedProvider::ok("recovered"),
        ]));
        let client = client_with(provider.clone());

        let long_input = "x".repeat(5000);
        let result = client.generate("instr", &long_input, 800).await;

        assert_eq!(result, "recovered");
        assert_eq!(provider.call_count(), 2);

        let requests = provider.requests.lock().unwrap();
        // Halved (800/2 = 400) then capped at 300
        assert_eq!(requests[1].params.max_tokens, 300);
        // Input truncated to 2000 chars plus the marker
        assert!(requests[1].input.starts_with(&"x".repeat(2000)));
        assert!(requests[1].input.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            requests[1].input.chars().count(),
            2000 + TRUNCATION_MARKER.chars().count()
        );
    }

    #[tokio::test]
    async fn test_small_budget_fallback_not_capped() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedProvider::err(ErrorCategory::TokenLimit, "length exceeded"),
            ScriptedProvider::ok("ok"),
        ]));
        let client = client_with(provider.clone());

        client.generate("instr", "tiny", 200).await;

        let requests = provider.requests.lock().unwrap();
        // 200/2 = 100, below the 300 cap
        assert_eq!(requests[1].params.max_tokens, 100);
    }

    #[tokio::test]
    async fn test_exhausted_fallback_yields_marker_string() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedProvider::err(ErrorCategory::TokenLimit, "token limit"),
            ScriptedProvider::err(ErrorCategory::TokenLimit, "still too long"),
        ]));
        let client = client_with(provider.clone());

        let result = client.generate("instr", "input", 800).await;

        assert!(result.starts_with("[generation error after fallback:"));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_non_size_error_gets_no_fallback() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::err(
            ErrorCategory::Auth,
            "bad api key",
        )]));
        let client = client_with(provider.clone());

        let result = client.generate("instr", "input", 800).await;

        assert!(result.starts_with("[generation error:"));
        assert!(result.contains("bad api key"));
        assert_eq!(provider.call_count(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Temperature weakly decreases and penalties weakly increase
            /// with input size, for any pair of lengths.
            #[test]
            fn params_monotonic(len_a in 0usize..10_000, len_b in 0usize..10_000) {
                let provider = Arc::new(ScriptedProvider::new(vec![]));
                let client = client_with(provider);

                let (short, long) = if len_a <= len_b { (len_a, len_b) } else { (len_b, len_a) };
                let p_short = client.params_for(short);
                let p_long = client.params_for(long);

                prop_assert!(p_short.temperature >= p_long.temperature);
                prop_assert!(p_short.frequency_penalty <= p_long.frequency_penalty);
                prop_assert!(p_short.presence_penalty <= p_long.presence_penalty);
                prop_assert!(p_short.top_p >= p_long.top_p);
            }
        }
    }
}
