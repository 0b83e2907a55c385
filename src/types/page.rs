//! Collected Page Data
//!
//! `PageRecord` is the unit produced by the page fetcher: one per URL, with a
//! success/failure status baked in rather than surfaced as an error. The
//! per-run collection is a `RawDataset`, persisted verbatim as the raw-data
//! JSON file.

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Fetch Status
// =============================================================================

/// Outcome of fetching one URL.
///
/// Serialized as a plain string ("success" or "failed: <reason>") so the
/// raw-data file stays readable and diff-friendly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FetchStatus {
    Success,
    Failed(String),
}

impl FetchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<FetchStatus> for String {
    fn from(status: FetchStatus) -> Self {
        match status {
            FetchStatus::Success => "success".to_string(),
            FetchStatus::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

impl From<String> for FetchStatus {
    fn from(s: String) -> Self {
        if s == "success" {
            FetchStatus::Success
        } else {
            let reason = s.strip_prefix("failed: ").unwrap_or(&s).to_string();
            FetchStatus::Failed(reason)
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

// =============================================================================
// Page Record
// =============================================================================

/// Everything extracted from one URL. On failure `cleaned_text` is empty and
/// `status` carries the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cleaned_text: String,
    pub status: FetchStatus,
    pub fetched_at: DateTime<Utc>,
}

impl PageRecord {
    /// Construct a failure record for a URL that could not be fetched.
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            cleaned_text: String::new(),
            status: FetchStatus::Failed(reason.into()),
            fetched_at: Utc::now(),
        }
    }

    /// First non-empty text source, checked in priority order:
    /// cleaned body text, then the meta description.
    pub fn best_text(&self) -> &str {
        if !self.cleaned_text.is_empty() {
            &self.cleaned_text
        } else {
            &self.description
        }
    }
}

// =============================================================================
// Raw Dataset
// =============================================================================

/// Metadata block at the top of the raw-data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMetadata {
    pub collected_at: DateTime<Utc>,
    pub term_count: usize,
    pub url_count: usize,
    pub source_file: String,
    pub version: String,
}

/// Pages collected for one search term
#[derive(Debug, Clone)]
pub struct TermPages {
    pub term: String,
    pub pages: Vec<PageRecord>,
}

/// The complete collection artifact for a run: metadata plus per-term page
/// lists in term processing order. The agent pipeline and the greedy
/// synthesis truncation both follow that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataset {
    pub metadata: RawMetadata,
    #[serde(
        serialize_with = "serialize_term_data",
        deserialize_with = "deserialize_term_data"
    )]
    pub data: Vec<TermPages>,
}

impl RawDataset {
    pub fn total_pages(&self) -> usize {
        self.data.iter().map(|t| t.pages.len()).sum()
    }

    pub fn success_count(&self) -> usize {
        self.data
            .iter()
            .flat_map(|t| &t.pages)
            .filter(|p| p.status.is_success())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.total_pages() - self.success_count()
    }
}

/// Render `data` as a JSON object keyed by term, preserving insertion order.
fn serialize_term_data<S>(data: &[TermPages], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(data.len()))?;
    for entry in data {
        map.serialize_entry(&entry.term, &entry.pages)?;
    }
    map.end()
}

/// Read the term→pages object back in file order.
fn deserialize_term_data<'de, D>(deserializer: D) -> Result<Vec<TermPages>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TermDataVisitor;

    impl<'de> Visitor<'de> for TermDataVisitor {
        type Value = Vec<TermPages>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of term to page records")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((term, pages)) = access.next_entry::<String, Vec<PageRecord>>()? {
                entries.push(TermPages { term, pages });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(TermDataVisitor)
}

// =============================================================================
// Tests
// =============================================================================
