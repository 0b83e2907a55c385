//! Unified Error Type System
//!
//! Centralized error types for the entire application, with structured
//! classification of provider errors at the API boundary.
//!
//! ## Error Categories
//!
//! - **TokenLimit**: input/output too large (triggers the single fallback)
//! - **RateLimit**: API rate limiting
//! - **Auth**: authentication failures (fail fast)
//! - **Network**: connectivity issues
//! - **Unavailable**: provider down
//!
//! Page-fetch failures are deliberately NOT errors: the fetch boundary
//! records them as failed `PageRecord`s and the run continues.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Categories for provider errors, used to decide fallback behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input or output exceeded a size limit - retry once with reduced budget
    TokenLimit,
    /// Rate limited by the provider
    RateLimit,
    /// Authentication failed - misconfiguration, no point retrying
    Auth,
    /// Network/connectivity problem
    Network,
    /// Provider temporarily unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenLimit => write!(f, "TOKEN_LIMIT"),
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Whether this category should trigger the one-shot reduced-budget
    /// fallback in the generation client.
    pub fn is_size_related(&self) -> bool {
        matches!(self, Self::TokenLimit)
    }
}

// =============================================================================
// Provider Error
// =============================================================================

/// Provider error with category and context
#[derive(Debug, Clone)]
pub struct ProviderError {
    /// Category for fallback decisions
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Whether the one-shot fallback applies
    pub fn is_size_related(&self) -> bool {
        self.category.is_size_related()
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Classifies provider failures into categories.
///
/// HTTP status codes are authoritative where available. Body-text matching is
/// a best-effort fallback: the generate endpoint reports context-size limits
/// as 400s with free-text bodies, so the substring heuristic on
/// "token"/"length" wording is kept despite being brittle against provider
/// message changes.
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> ProviderError {
        let lower = message.to_lowercase();

        // Size-limit patterns first: these gate the reduced-budget fallback
        if lower.contains("token")
            || lower.contains("length")
            || lower.contains("context")
            || lower.contains("too large")
        {
            return ProviderError::with_provider(ErrorCategory::TokenLimit, message, provider);
        }

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota")
        {
            return ProviderError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
        {
            return ProviderError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return ProviderError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("unavailable")
            || lower.contains("overloaded")
            || lower.contains("server error")
        {
            return ProviderError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("400") || lower.contains("bad request") || lower.contains("invalid") {
            return ProviderError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        ProviderError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify an HTTP status code directly (more accurate than string
    /// matching). A 400 body is still inspected for size-limit wording.
    pub fn classify_http_status(status: u16, body: &str, provider: &str) -> ProviderError {
        match status {
            429 => ProviderError::with_provider(ErrorCategory::RateLimit, body, provider),
            401 | 403 => ProviderError::with_provider(ErrorCategory::Auth, body, provider),
            400 | 422 => {
                let lower = body.to_lowercase();
                if lower.contains("token") || lower.contains("length") || lower.contains("context")
                {
                    ProviderError::with_provider(ErrorCategory::TokenLimit, body, provider)
                } else {
                    ProviderError::with_provider(ErrorCategory::BadRequest, body, provider)
                }
            }
            500 | 502 | 503 | 504 => {
                ProviderError::with_provider(ErrorCategory::Unavailable, body, provider)
            }
            _ => ProviderError::with_provider(ErrorCategory::Unknown, body, provider),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum WebloomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured provider error with category
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    #[error("Config error: {0}")]
    Config(String),

    /// Run artifact file unreadable, unwritable, or structurally invalid.
    /// Always names the offending path.
    #[error("Data file error for {}: {message}", path.display())]
    DataFile {
        path: std::path::PathBuf,
        message: String,
    },
}

impl From<ProviderError> for WebloomError {
    fn from(err: ProviderError) -> Self {
        WebloomError::Provider(err)
    }
}

pub type Result<T> = std::result::Result<T, WebloomError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::TokenLimit.to_string(), "TOKEN_LIMIT");
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
    }

    #[test]
    fn test_classify_token_limit() {
        let err = ErrorClassifier::classify("too many tokens in prompt", "cohere");
        assert_eq!(err.category, ErrorCategory::TokenLimit);
        assert!(err.is_size_related());

        let err = ErrorClassifier::classify("maximum length exceeded", "cohere");
        assert_eq!(err.category, ErrorCategory::TokenLimit);
    }

    #[test]
    fn test_classify_auth() {
        let err = ErrorClassifier::classify("invalid api key provided", "cohere");
        assert_eq!(err.category, ErrorCategory::Auth);
        assert!(!err.is_size_related());
    }

    #[test]
    fn test_classify_network() {
        let err = ErrorClassifier::classify("connection timed out after 30s", "cohere");
        assert_eq!(err.category, ErrorCategory::Network);
    }

    #[test]
    fn test_classify_transport_messages() {
        // The shapes the HTTP layer produces for transport failures
        for message in [
            "request timed out: operation timed out",
            "connection failed: tcp connect error",
            "network error: error sending request",
        ] {
            let err = ErrorClassifier::classify(message, "cohere");
            assert_eq!(err.category, ErrorCategory::Network, "{message}");
            assert!(!err.is_size_related());
        }
    }

    #[test]
    fn test_classify_unknown() {
        let err = ErrorClassifier::classify("something odd happened", "cohere");
        assert_eq!(err.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_classify_http_status() {
        let rate = ErrorClassifier::classify_http_status(429, "slow down", "cohere");
        assert_eq!(rate.category, ErrorCategory::RateLimit);

        let auth = ErrorClassifier::classify_http_status(401, "unauthorized", "cohere");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let unavailable = ErrorClassifier::classify_http_status(503, "down", "cohere");
        assert_eq!(unavailable.category, ErrorCategory::Unavailable);
    }

    #[test]
    fn test_classify_400_with_token_body() {
        let err = ErrorClassifier::classify_http_status(
            400,
            "prompt exceeds maximum token count",
            "cohere",
        );
        assert_eq!(err.category, ErrorCategory::TokenLimit);

        let err = ErrorClassifier::classify_http_status(400, "unknown field 'foo'", "cohere");
        assert_eq!(err.category, ErrorCategory::BadRequest);
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::with_provider(ErrorCategory::RateLimit, "slow down", "cohere");
        assert_eq!(err.to_string(), "[cohere:RATE_LIMIT] slow down");

        let bare = ProviderError::new(ErrorCategory::Network, "connection refused");
        assert_eq!(bare.to_string(), "[NETWORK] connection refused");
    }
}
