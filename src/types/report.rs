//! Report Types
//!
//! Results of the per-term agent chain plus the run identity that names the
//! output artifacts.

use serde::{Deserialize, Serialize};

use crate::constants::output as output_constants;

// =============================================================================
// Term Result
// =============================================================================

/// The three texts produced by the per-term agent chain. Only constructed
/// from a non-empty digest; terms with no usable content never get one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermResult {
    pub term: String,
    pub summary: String,
    pub analysis: String,
    pub organization: String,
}

// =============================================================================
// Run Statistics
// =============================================================================

/// Aggregate statistics embedded in the synthesis prompt and the final
/// report's metadata footer.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub term_count: usize,
    pub char_volume: usize,
    pub source_file: String,
}

// =============================================================================
// Run Identity
// =============================================================================

/// Deterministic filesystem identity for a run, derived from the topic.
///
/// Lowercased, whitespace collapsed to underscores, characters that are
/// unsafe in filenames stripped, capped at a fixed length. Used consistently
/// to name all three artifact files so a topic always maps to the same set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub fn from_topic(topic: &str) -> Self {
        let mut out = String::with_capacity(topic.len());
        let mut pending_sep = false;

        for ch in topic.trim().chars() {
            if ch.is_whitespace() {
                pending_sep = !out.is_empty();
                continue;
            }
            if matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                continue;
            }
            if pending_sep {
                out.push('_');
                pending_sep = false;
            }
            out.extend(ch.to_lowercase());
        }

        if out.chars().count() > output_constants::RUN_ID_MAX_CHARS {
            out = out
                .chars()
                .take(output_constants::RUN_ID_MAX_CHARS)
                .collect();
        }
        RunId(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw collected-data artifact (JSON)
    pub fn raw_data_file(&self) -> String {
        format!("data_{}.json", self.0)
    }

    /// Per-term partial report artifact (text)
    pub fn partial_report_file(&self) -> String {
        format!("report_partial_{}.txt", self.0)
    }

    /// Final synthesis artifact (text)
    pub fn final_report_file(&self) -> String {
        format!("report_final_{}.txt", self.0)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_normalizes_topic() {
        let id = RunId::from_topic("Python & Machine Learning");
        assert_eq!(id.as_str(), "python_&_machine_learning");
    }

    #[test]
    fn test_run_id_strips_filesystem_chars() {
        let id = RunId::from_topic("what/is:rust?");
        assert_eq!(id.as_str(), "whatisrust");
    }

    #[test]
    fn test_run_id_collapses_whitespace() {
        let id = RunId::from_topic("  deep   learning  ");
        assert_eq!(id.as_str(), "deep_learning");
    }

    #[test]
    fn test_run_id_length_cap() {
        let long = "a".repeat(200);
        let id = RunId::from_topic(&long);
        assert_eq!(id.as_str().len(), 50);
    }

    #[test]
    fn test_run_id_cap_respects_multibyte_chars() {
        let long = "é".repeat(200);
        let id = RunId::from_topic(&long);
        assert_eq!(id.as_str().chars().count(), 50);
    }

    #[test]
    fn test_run_id_is_deterministic() {
        assert_eq!(
            RunId::from_topic("Data Science"),
            RunId::from_topic("Data Science")
        );
    }

    #[test]
    fn test_artifact_names_share_identity() {
        let id = RunId::from_topic("Rust Async");
        assert_eq!(id.raw_data_file(), "data_rust_async.json");
        assert_eq!(id.partial_report_file(), "report_partial_rust_async.txt");
        assert_eq!(id.final_report_file(), "report_final_rust_async.txt");
    }
}
