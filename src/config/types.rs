//! Configuration Types
//!
//! All configuration structures with sensible defaults. The loaded `Config`
//! is an immutable value handed into the client, fetcher, and pipeline
//! constructors; nothing reads configuration through globals.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{content, generation, network, search};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Text-generation provider settings
    pub provider: ProviderConfig,

    /// Sampling-tier settings
    pub generation: GenerationConfig,

    /// Page fetching settings
    pub fetch: FetchConfig,

    /// Pipeline size budgets
    pub pipeline: PipelineConfig,

    /// Output artifact settings
    pub output: OutputConfig,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `WebloomError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.provider.timeout_secs == 0 {
            return Err(crate::types::WebloomError::Config(
                "provider.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(crate::types::WebloomError::Config(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.generation.small_threshold >= self.generation.medium_threshold {
            return Err(crate::types::WebloomError::Config(format!(
                "generation tier thresholds must be increasing: small ({}) >= medium ({})",
                self.generation.small_threshold, self.generation.medium_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.generation.base_temperature) {
            return Err(crate::types::WebloomError::Config(format!(
                "generation.base_temperature must be between 0.0 and 1.0, got {}",
                self.generation.base_temperature
            )));
        }
        if self.pipeline.max_synthesis_chars == 0 || self.pipeline.max_page_digest_chars == 0 {
            return Err(crate::types::WebloomError::Config(
                "pipeline size budgets must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model name passed to the generate endpoint
    pub model: String,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "command".to_string(),
            api_base: None,
            timeout_secs: network::PROVIDER_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Generation Tiers
// =============================================================================

/// Size-tier thresholds and baseline sampling parameters.
/// Kept in configuration (not just constants) so tests can inject
/// small thresholds without megabyte fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Inputs at or below this length (chars) use the small tier
    pub small_threshold: usize,

    /// Inputs at or below this length (chars) use the medium tier
    pub medium_threshold: usize,

    /// Medium-tier temperature; small tier adds 0.1, large subtracts 0.1
    pub base_temperature: f32,

    /// Output budget used when an agent does not specify one
    pub default_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            small_threshold: generation::SMALL_THRESHOLD,
            medium_threshold: generation::MEDIUM_THRESHOLD,
            base_temperature: generation::DEFAULT_TEMPERATURE,
            default_output_tokens: generation::DEFAULT_OUTPUT_TOKENS,
        }
    }
}

// =============================================================================
// Fetch Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with page requests
    pub user_agent: String,

    /// Cap on cleaned text returned per page (chars)
    pub max_content_chars: usize,

    /// Maximum candidate URLs fetched per search term
    pub max_pages_per_term: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: network::FETCH_TIMEOUT_SECS,
            user_agent: network::USER_AGENT.to_string(),
            max_content_chars: content::MAX_PAGE_CONTENT_CHARS,
            max_pages_per_term: search::MAX_PAGES_PER_TERM,
        }
    }
}

// =============================================================================
// Pipeline Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Per-page cap when building a term digest (chars)
    pub max_page_digest_chars: usize,

    /// Minimum page text length to contribute to a digest (chars)
    pub min_page_text_chars: usize,

    /// Global budget for the combined synthesis input (chars)
    pub max_synthesis_chars: usize,

    /// Original-content excerpt handed to the organizer stage (chars)
    pub organizer_excerpt_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_page_digest_chars: content::MAX_PAGE_DIGEST_CHARS,
            min_page_text_chars: content::MIN_PAGE_TEXT_CHARS,
            max_synthesis_chars: content::MAX_SYNTHESIS_CHARS,
            organizer_excerpt_chars: content::ORGANIZER_EXCERPT_CHARS,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the three artifact files are written into
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.generation.small_threshold = 5000;
        config.generation.medium_threshold = 3000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let mut config = Config::default();
        config.generation.base_temperature = 1.5;
        assert!(config.validate().is_err());
    }
}
