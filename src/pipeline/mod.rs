//! The research pipeline: per-term agent chain, final synthesis, and the
//! orchestrator that drives a whole run.

pub mod orchestrator;
pub mod synthesis;
pub mod term;

pub use orchestrator::{Orchestrator, parse_terms};
pub use synthesis::{SynthesisOutcome, SynthesisStage};
pub use term::TermPipeline;
