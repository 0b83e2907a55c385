//! End-to-end run orchestration.
//!
//! Drives topic to terms, terms to pages, pages to per-term results, and
//! results to the final synthesis, writing the three run artifacts along the
//! way. Everything runs strictly in sequence.

use std::sync::Arc;

use regex::Regex;
use tracing::{info, warn};

use crate::ai::{AgentSet, GenerationClient, SharedProvider, prompts};
use crate::cli::ui::Output;
use crate::config::Config;
use crate::constants::{content, search};
use crate::output::{OutputFiles, PartialReportWriter, build_dataset, read_raw, write_final_report};
use crate::pipeline::synthesis::SynthesisStage;
use crate::pipeline::term::TermPipeline;
use crate::types::{RawDataset, Result, RunId, TermPages, TermResult};
use crate::web::{PageFetcher, SourceCatalog};

pub struct Orchestrator {
    config: Config,
    agents: AgentSet,
    fetcher: PageFetcher,
}

impl Orchestrator {
    pub fn new(config: Config, provider: SharedProvider) -> Result<Self> {
        let client = Arc::new(GenerationClient::new(provider, config.generation.clone()));
        let agents = AgentSet::specialized(client);
        let fetcher = PageFetcher::new(&config.fetch)?;
        Ok(Self {
            config,
            agents,
            fetcher,
        })
    }

    /// Full run: generate terms, collect pages, write raw data, process
    /// every term, synthesize.
    pub async fn run_search(&self, topic: &str, out: &Output) -> Result<()> {
        let run_id = RunId::from_topic(topic);
        let files = OutputFiles::new(&self.config.output.dir, run_id);
        files.ensure_dir()?;

        out.section("GENERATING SEARCH TERMS");
        let terms = self.generate_terms(topic).await;
        for (i, term) in terms.iter().enumerate() {
            out.item(i + 1, term);
        }

        out.section("COLLECTING WEB PAGES");
        let collected = self.collect(&terms, out).await;

        let source_file = files
            .raw_data_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dataset = build_dataset(collected, &source_file);
        files.write_raw(&dataset)?;
        self.report_collection_stats(&dataset, out);

        out.section("PROCESSING WITH AGENT PIPELINE");
        self.process_dataset(topic, &dataset, &files, out).await
    }

    /// Reprocess an existing raw-data file without refetching anything.
    ///
    /// A missing or malformed file aborts before any output file is touched.
    pub async fn resummarize(&self, topic: &str, out: &Output) -> Result<()> {
        let run_id = RunId::from_topic(topic);
        let files = OutputFiles::new(&self.config.output.dir, run_id);
        files.ensure_dir()?;

        let path = files.raw_data_path();
        let dataset = read_raw(&path)?;
        out.info(&format!(
            "Loaded {} terms ({} pages) from {}",
            dataset.data.len(),
            dataset.total_pages(),
            path.display()
        ));

        self.process_dataset(topic, &dataset, &files, out).await
    }

    /// Ask the term generator for search terms, with two parsing fallbacks.
    async fn generate_terms(&self, topic: &str) -> Vec<String> {
        let prompt = prompts::term_generation_input(topic, search::TERMS_PER_TOPIC);
        let response = self.agents.term_generator.run(&prompt).await;
        parse_terms(&response, topic)
    }

    /// Fetch every catalog URL for every term, in order
    async fn collect(&self, terms: &[String], out: &Output) -> Vec<TermPages> {
        let mut collected = Vec::with_capacity(terms.len());
        for term in terms {
            let urls = SourceCatalog::lookup(term, self.config.fetch.max_pages_per_term);
            out.step(&format!("{term} ({} pages)", urls.len()));

            let mut pages = Vec::with_capacity(urls.len());
            for url in &urls {
                pages.push(self.fetcher.fetch(url).await);
            }
            collected.push(TermPages {
                term: term.clone(),
                pages,
            });
        }
        collected
    }

    fn report_collection_stats(&self, dataset: &RawDataset, out: &Output) {
        let total = dataset.total_pages();
        let ok = dataset.success_count();
        let failed = dataset.failure_count();
        out.info(&format!("Pages processed: {total}"));
        out.success(&format!("Fetched: {ok}"));
        if failed > 0 {
            out.warning(&format!("Failed: {failed}"));
        }
        if total > 0 {
            out.info(&format!(
                "Success rate: {:.1}%",
                ok as f64 / total as f64 * 100.0
            ));
        }
    }

    /// Per-term pipeline over a dataset, then the final synthesis.
    ///
    /// Each term's result is flushed to the partial file as soon as it
    /// exists, so a mid-run failure keeps earlier terms on disk.
    async fn process_dataset(
        &self,
        topic: &str,
        dataset: &RawDataset,
        files: &OutputFiles,
        out: &Output,
    ) -> Result<()> {
        let pipeline = TermPipeline::new(&self.agents, &self.config.pipeline);
        let mut partial = PartialReportWriter::create(&files.partial_report_path())?;
        let mut results: Vec<TermResult> = Vec::new();

        for term_pages in &dataset.data {
            out.step(&format!("Processing term: {}", term_pages.term));
            match pipeline.run(&term_pages.term, &term_pages.pages).await {
                Some(result) => {
                    partial.append_term(&result)?;
                    out.success(&format!("Term '{}' processed", result.term));
                    results.push(result);
                }
                None => {
                    out.warning(&format!(
                        "Term '{}' skipped: no usable content",
                        term_pages.term
                    ));
                }
            }
        }
        info!(path = %partial.path().display(), "Partial results written");

        out.section("CREATING FINAL SYNTHESIS");
        let stage = SynthesisStage::new(&self.agents, &self.config.pipeline);
        match stage
            .run(topic, &results, &dataset.metadata.source_file)
            .await
        {
            Some(outcome) => {
                let path = files.final_report_path();
                write_final_report(&path, &outcome.text, &outcome.stats)?;
                out.success(&format!("Final report saved to {}", path.display()));
                out.preview(
                    "SYNTHESIS PREVIEW",
                    &outcome.text,
                    content::SYNTHESIS_PREVIEW_CHARS,
                );
                out.info(&format!(
                    "Terms processed: {} of {}",
                    outcome.stats.term_count,
                    dataset.data.len()
                ));
                out.info(&format!(
                    "Material volume: {} characters",
                    outcome.stats.char_volume
                ));
            }
            None => {
                warn!("Synthesis skipped, no term produced results");
                out.warning("Nothing to synthesize; no final report written");
            }
        }
        Ok(())
    }
}

/// Pull search terms out of the generator's response.
///
/// Primary form is a numbered list. Failing that, any plausible free line
/// counts; failing that too, fixed templates over the topic keep the run
/// alive.
pub fn parse_terms(response: &str, topic: &str) -> Vec<String> {
    let numbered = Regex::new(r"\d+\.\s*([^\n]+)").expect("static pattern");
    let mut terms: Vec<String> = numbered
        .captures_iter(response)
        .map(|cap| cap[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        terms = response
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > 5)
            .filter(|line| !line.starts_with("Topic") && !line.starts_with("Generate"))
            .map(String::from)
            .collect();
    }

    if terms.is_empty() {
        warn!("Term generation unusable, falling back to topic templates");
        terms = vec![
            format!("{topic} tutorial"),
            format!("{topic} documentation"),
            format!("{topic} beginner guide"),
            format!("{topic} core concepts"),
            format!("{topic} practical examples"),
        ];
    }

    terms.truncate(search::TERMS_PER_TOPIC);
    terms
}
