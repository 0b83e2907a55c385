//! Core Types
//!
//! Data model and error types shared across the crate.

pub mod error;
pub mod page;
pub mod report;

pub use error::{ErrorCategory, ErrorClassifier, ProviderError, Result, WebloomError};
pub use page::{FetchStatus, PageRecord, RawDataset, RawMetadata, TermPages};
pub use report::{RunId, RunStats, TermResult};
