//! Web collection: source lookup, page fetching, and text cleaning.

pub mod clean;
pub mod fetch;
pub mod sources;

pub use clean::TextCleaner;
pub use fetch::PageFetcher;
pub use sources::SourceCatalog;
