//! Per-term pipeline: digest construction and the three-stage agent chain.

use tracing::{debug, info, warn};

use crate::ai::{AgentSet, prompts};
use crate::config::PipelineConfig;
use crate::types::{PageRecord, TermResult};

/// Runs one search term's pages through summarize, analyze, and organize
pub struct TermPipeline<'a> {
    agents: &'a AgentSet,
    config: &'a PipelineConfig,
}

impl<'a> TermPipeline<'a> {
    pub fn new(agents: &'a AgentSet, config: &'a PipelineConfig) -> Self {
        Self { agents, config }
    }

    /// Concatenate usable text from a term's successful pages.
    ///
    /// Failed pages and pages with too little text contribute nothing; each
    /// kept page is capped before concatenation.
    pub fn build_digest(&self, pages: &[PageRecord]) -> String {
        let mut blocks: Vec<String> = Vec::new();
        for page in pages {
            if !page.status.is_success() {
                continue;
            }
            let text = page.best_text();
            if text.chars().count() <= self.config.min_page_text_chars {
                continue;
            }
            blocks.push(text.chars().take(self.config.max_page_digest_chars).collect());
        }
        blocks.join("\n\n")
    }

    /// Run the agent chain over one term's pages.
    ///
    /// Returns `None` when no usable content was fetched; the term is then
    /// absent from all downstream output. Stages run strictly in order, each
    /// prompt folding in the previous stage's text.
    pub async fn run(&self, term: &str, pages: &[PageRecord]) -> Option<TermResult> {
        let digest = self.build_digest(pages);
        if digest.is_empty() {
            warn!(term, "No usable content, skipping term");
            return None;
        }

        info!(term, digest_chars = digest.chars().count(), "Running term pipeline");

        debug!(term, "Stage 1: summarize");
        let summary = self
            .agents
            .summarizer
            .run(&prompts::summarizer_input(term, &digest))
            .await;

        debug!(term, "Stage 2: analyze");
        let analysis = self
            .agents
            .analyst
            .run(&prompts::analyst_input(term, &digest, &summary))
            .await;

        debug!(term, "Stage 3: organize");
        let excerpt: String = digest
            .chars()
            .take(self.config.organizer_excerpt_chars)
            .collect();
        let organization = self
            .agents
            .organizer
            .run(&prompts::organizer_input(term, &digest, &summary, &analysis, &excerpt))
            .await;

        Some(TermResult {
            term: term.to_string(),
            summary,
            analysis,
            organization,
        })
    }
}
