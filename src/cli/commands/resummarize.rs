//! Resummarize Command
//!
//! Rerun the agent pipeline over a previously collected raw-data file,
//! without touching the network for pages.

use tokio::runtime::Runtime;

use crate::cli::commands::build_orchestrator;
use crate::cli::ui::Output;
use crate::config::Config;
use crate::types::Result;

pub fn run(topic: &str, config: Config) -> Result<()> {
    let out = Output::new();
    out.header(&format!("RESUMMARIZE: {topic}"));

    let orchestrator = build_orchestrator(config)?;

    let runtime = Runtime::new()?;
    if let Err(e) = runtime.block_on(orchestrator.resummarize(topic, &out)) {
        out.error(&format!("{e}"));
        out.info("Run a full search first to collect data for this topic.");
        return Err(e);
    }

    out.success("Resummarize complete");
    Ok(())
}
