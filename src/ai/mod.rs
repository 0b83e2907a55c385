//! AI layer: provider abstraction, generation client, and specialized agents.

pub mod agent;
pub mod client;
pub mod prompts;
pub mod provider;

pub use agent::{Agent, AgentSet};
pub use client::{GenerationClient, SizeTier, TRUNCATION_MARKER};
pub use provider::{
    CohereProvider, GenerationOutput, GenerationRequest, SamplingParams, SharedProvider,
    TextProvider,
};
