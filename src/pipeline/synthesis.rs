//! Final synthesis stage.
//!
//! Formats one block per term result, packs blocks into a global character
//! budget by greedy prefix inclusion, and issues the single synthesizer call.

use tracing::{info, warn};

use crate::ai::{AgentSet, prompts};
use crate::config::PipelineConfig;
use crate::constants::content;
use crate::types::{RunStats, TermResult};

const BLOCK_SEPARATOR: &str = "\n\n============================================================\n\n";

/// Marker appended to a block cut short by the synthesis budget
pub const BLOCK_TRUNCATION_MARKER: &str = "\n\n[BLOCK TRUNCATED]";

/// Outcome of packing term blocks into the synthesis budget
pub struct CombinedBlocks {
    pub text: String,
    pub included_whole: usize,
    pub truncated_tail: bool,
}

/// Final synthesis text together with the run statistics that produced it
pub struct SynthesisOutcome {
    pub text: String,
    pub stats: RunStats,
}

/// Builds the synthesis input and runs the final call
pub struct SynthesisStage<'a> {
    agents: &'a AgentSet,
    config: &'a PipelineConfig,
}

impl<'a> SynthesisStage<'a> {
    pub fn new(agents: &'a AgentSet, config: &'a PipelineConfig) -> Self {
        Self { agents, config }
    }

    /// One formatted block per term, in term processing order
    pub fn format_block(result: &TermResult) -> String {
        format!(
            "TERM: {}\nSUMMARY: {}\nANALYSIS: {}\nORGANIZATION: {}",
            result.term, result.summary, result.analysis, result.organization
        )
    }

    /// Greedy prefix packing: whole blocks until the budget would overflow,
    /// then at most one truncated tail block with a marker.
    ///
    /// A tail is only worth including when the space left after the reserve
    /// still fits a meaningful amount of text.
    pub fn combine(&self, blocks: &[String]) -> CombinedBlocks {
        let budget = self.config.max_synthesis_chars;
        let total: usize = blocks.iter().map(|b| b.chars().count()).sum();

        if total <= budget {
            return CombinedBlocks {
                text: blocks.join(BLOCK_SEPARATOR),
                included_whole: blocks.len(),
                truncated_tail: false,
            };
        }

        let mut kept: Vec<String> = Vec::new();
        let mut used = 0usize;
        let mut truncated_tail = false;

        for block in blocks {
            let len = block.chars().count();
            if used + len <= budget {
                kept.push(block.clone());
                used += len;
            } else {
                let remaining = budget.saturating_sub(used + content::SYNTHESIS_RESERVE_CHARS);
                if remaining > content::MIN_TRUNCATED_BLOCK_CHARS {
                    let head: String = block.chars().take(remaining).collect();
                    kept.push(format!("{head}{BLOCK_TRUNCATION_MARKER}"));
                    truncated_tail = true;
                }
                break;
            }
        }

        let included_whole = kept.len() - usize::from(truncated_tail);
        warn!(
            included = included_whole,
            total = blocks.len(),
            truncated_tail,
            "Synthesis input trimmed to budget"
        );

        CombinedBlocks {
            text: kept.join(BLOCK_SEPARATOR),
            included_whole,
            truncated_tail,
        }
    }

    /// Run the synthesizer over all term results.
    ///
    /// Returns `None` when there is nothing to synthesize.
    pub async fn run(
        &self,
        topic: &str,
        results: &[TermResult],
        source_file: &str,
    ) -> Option<SynthesisOutcome> {
        if results.is_empty() {
            info!("No term results available, nothing to synthesize");
            return None;
        }

        let blocks: Vec<String> = results.iter().map(Self::format_block).collect();
        let combined = self.combine(&blocks);

        let stats = RunStats {
            term_count: results.len(),
            char_volume: combined.text.chars().count(),
            source_file: source_file.to_string(),
        };

        info!(
            terms = stats.term_count,
            chars = stats.char_volume,
            "Running final synthesis"
        );

        let prompt = prompts::synthesis_input(topic, &stats, &combined.text);
        let text = self.agents.synthesizer.run(&prompt).await;
        Some(SynthesisOutcome { text, stats })
    }
}
