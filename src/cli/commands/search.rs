//! Search Command
//!
//! Full run: generate terms for a topic, collect pages, run the agent
//! pipeline, write all three artifacts.

use tokio::runtime::Runtime;

use crate::cli::commands::build_orchestrator;
use crate::cli::ui::Output;
use crate::config::Config;
use crate::types::Result;

pub fn run(topic: &str, config: Config) -> Result<()> {
    let out = Output::new();
    out.header(&format!("RESEARCH RUN: {topic}"));

    let orchestrator = build_orchestrator(config)?;

    let runtime = Runtime::new()?;
    runtime.block_on(orchestrator.run_search(topic, &out))?;

    out.success("Run complete");
    Ok(())
}
