//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Generation parameter tiers
///
/// Sampling parameters shift with input size: larger inputs get lower
/// temperature and higher penalties so completions stay deterministic and
/// non-repetitive.
pub mod generation {
    /// Input length (chars) at or below which the small tier applies
    pub const SMALL_THRESHOLD: usize = 1000;

    /// Input length (chars) at or below which the medium tier applies
    pub const MEDIUM_THRESHOLD: usize = 3000;

    /// Token budgets per tier
    pub const SMALL_MAX_TOKENS: u32 = 400;
    pub const MEDIUM_MAX_TOKENS: u32 = 800;
    pub const LARGE_MAX_TOKENS: u32 = 1200;

    /// Baseline temperature (medium tier); small adds 0.1, large subtracts 0.1
    pub const DEFAULT_TEMPERATURE: f32 = 0.6;

    /// Nucleus sampling value; large tier lowers it by 0.05
    pub const DEFAULT_TOP_P: f32 = 0.9;

    /// Repetition penalties; large tier raises both by 0.05
    pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.1;
    pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.1;

    /// Output budget an agent gets when none is specified
    pub const DEFAULT_OUTPUT_TOKENS: u32 = 500;

    /// Fallback attempt: output budget is halved and capped at this
    pub const FALLBACK_MAX_TOKENS: u32 = 300;

    /// Fallback attempt: input is truncated to this many chars
    pub const FALLBACK_INPUT_CHARS: usize = 2000;
}

/// Agent output budgets (tokens), fixed per role regardless of input size
pub mod agents {
    pub const SUMMARIZER_TOKENS: u32 = 600;
    pub const ANALYST_TOKENS: u32 = 800;
    pub const ORGANIZER_TOKENS: u32 = 700;
    pub const SYNTHESIZER_TOKENS: u32 = 2000;
    pub const TERM_GENERATOR_TOKENS: u32 = 400;
}

/// Content size limits for the pipeline
pub mod content {
    /// Per-page cap applied when building a term digest (chars)
    pub const MAX_PAGE_DIGEST_CHARS: usize = 3000;

    /// Minimum page text length to contribute to a digest (chars)
    pub const MIN_PAGE_TEXT_CHARS: usize = 100;

    /// Global budget for the combined synthesis input (chars)
    pub const MAX_SYNTHESIS_CHARS: usize = 12_000;

    /// Reserve held back before truncating the trailing block (chars)
    pub const SYNTHESIS_RESERVE_CHARS: usize = 100;

    /// Minimum remaining budget worth filling with a truncated block (chars)
    pub const MIN_TRUNCATED_BLOCK_CHARS: usize = 200;

    /// Original-content excerpt handed to the organizer stage (chars)
    pub const ORGANIZER_EXCERPT_CHARS: usize = 1500;

    /// Cap on cleaned text returned per fetched page (chars)
    pub const MAX_PAGE_CONTENT_CHARS: usize = 8000;

    /// Console preview length for the final synthesis (chars)
    pub const SYNTHESIS_PREVIEW_CHARS: usize = 800;
}

/// HTTP/Network constants
pub mod network {
    /// Page fetch timeout (seconds)
    pub const FETCH_TIMEOUT_SECS: u64 = 15;

    /// Provider request timeout (seconds)
    pub const PROVIDER_TIMEOUT_SECS: u64 = 120;

    /// Browser-like user agent for page fetches
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
}

/// Search/collection constants
pub mod search {
    /// Maximum candidate URLs per search term
    pub const MAX_PAGES_PER_TERM: usize = 5;

    /// Number of search terms derived from a topic
    pub const TERMS_PER_TOPIC: usize = 5;
}

/// Output artifact constants
pub mod output {
    /// Maximum length of a run identifier derived from a topic
    pub const RUN_ID_MAX_CHARS: usize = 50;

    /// Raw-data file format version
    pub const RAW_DATA_VERSION: &str = "2.0";
}
