//! Check Command
//!
//! Verifies the credential is resolvable and the provider is reachable.

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::ai::{CohereProvider, TextProvider};
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::Result;

pub fn run(config: Config) -> Result<()> {
    let out = Output::new();
    out.header("CONNECTIVITY CHECK");

    let api_key = match ConfigLoader::api_key() {
        Ok(key) => {
            out.success("Credential resolved");
            key
        }
        Err(e) => {
            out.error(&format!("{e}"));
            return Err(e);
        }
    };

    let provider: Arc<dyn TextProvider + Send + Sync> =
        Arc::new(CohereProvider::new(&config.provider, api_key)?);
    out.info(&format!(
        "Provider: {} (model {})",
        provider.name(),
        provider.model()
    ));

    let runtime = Runtime::new()?;
    match runtime.block_on(provider.health_check()) {
        Ok(true) => out.success("Provider reachable"),
        Ok(false) => out.warning("Provider responded but reported unhealthy"),
        Err(e) => {
            out.error(&format!("Provider unreachable: {e}"));
            return Err(e);
        }
    }

    Ok(())
}
