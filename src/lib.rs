//! Webloom - AI-Driven Web Research Reports
//!
//! Turns a free-text topic into a finished research report: generate search
//! terms, collect and clean curated web pages, then drive the text through a
//! sequential four-stage agent pipeline (summarize, analyze, organize,
//! synthesize) against a text-generation provider.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use webloom::{CohereProvider, Config, ConfigLoader, Orchestrator};
//! use webloom::cli::ui::Output;
//!
//! let config = ConfigLoader::load()?;
//! let provider = CohereProvider::new(&config.provider, ConfigLoader::api_key()?)?;
//! let orchestrator = Orchestrator::new(config, Arc::new(provider))?;
//! orchestrator.run_search("rust async programming", &Output::new()).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: provider abstraction, generation client, specialized agents
//! - [`web`]: source catalog, page fetching, text cleaning
//! - [`pipeline`]: per-term agent chain, synthesis stage, orchestration
//! - [`output`]: raw-data, partial-report, and final-report files

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod web;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, ProviderError, Result, WebloomError};

// Pipeline
pub use pipeline::{Orchestrator, SynthesisStage, TermPipeline};

// AI
pub use ai::{
    AgentSet, CohereProvider, GenerationClient, SamplingParams, SharedProvider, TextProvider,
};

// Web collection
pub use web::{PageFetcher, SourceCatalog, TextCleaner};

// Data model
pub use types::{PageRecord, RawDataset, RunId, TermResult};
