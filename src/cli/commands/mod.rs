pub mod check;
pub mod config;
pub mod menu;
pub mod resummarize;
pub mod search;

use std::sync::Arc;

use crate::ai::CohereProvider;
use crate::config::{Config, ConfigLoader};
use crate::pipeline::Orchestrator;
use crate::types::Result;

/// Resolve the credential and wire the provider into an orchestrator.
///
/// The credential check happens here, before any network activity.
pub(crate) fn build_orchestrator(config: Config) -> Result<Orchestrator> {
    let api_key = ConfigLoader::api_key()?;
    let provider = CohereProvider::new(&config.provider, api_key)?;
    Orchestrator::new(config, Arc::new(provider))
}
