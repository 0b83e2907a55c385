//! Role instructions and context builders for the report pipeline.

use crate::types::RunStats;

pub const SUMMARIZER_INSTRUCTION: &str = "You are a research summarizer. Produce a concise, \
factual summary of the provided web content. Keep concrete facts, figures, names, and dates. \
Drop navigation debris, boilerplate, and repetition. Write in clear prose, not bullet salad.";

pub const ANALYST_INSTRUCTION: &str = "You are a research analyst. Examine the provided summary \
and identify the key patterns, relationships, and implications it contains. Note points of \
agreement and tension between sources, and call out claims that look weakly supported.";

pub const ORGANIZER_INSTRUCTION: &str = "You are an information organizer. Restructure the \
provided analysis into a logical outline with clear thematic groupings. Order sections from \
foundational context to specific findings. Preserve every substantive point.";

pub const SYNTHESIZER_INSTRUCTION: &str = "You are a report synthesizer. Combine the provided \
per-term research blocks into one coherent, comprehensive report on the stated topic. Integrate \
overlapping findings, resolve redundancy, and present a unified narrative with an introduction, \
thematic body sections, and a closing assessment.";

pub const TERM_GENERATOR_INSTRUCTION: &str = "You are a search strategist. For the given \
research topic, produce a numbered list of specific, distinct web search terms that together \
cover the topic's main aspects. One term per line, numbered, no commentary.";

/// Header prefixed to every per-term stage input so the model knows what it
/// is looking at and how much of it there is.
pub fn context_header(term: &str, digest: &str) -> String {
    let words = digest.split_whitespace().count();
    let lines = digest.lines().count();
    format!("SEARCH TERM: {term}\nSOURCE SIZE: {words} words, {lines} lines\n")
}

pub fn summarizer_input(term: &str, digest: &str) -> String {
    format!(
        "{}\nTASK: Summarize the most important points of the content below.\n\nCONTENT:\n{digest}",
        context_header(term, digest)
    )
}

/// The analyst sees the summary plus the full digest, and is pointed at what
/// the summary did not cover.
pub fn analyst_input(term: &str, digest: &str, summary: &str) -> String {
    format!(
        "{}\nTASK: Analyze the content in depth, identifying insights and patterns.\n\n\
         INITIAL SUMMARY:\n{summary}\n\n\
         FULL CONTENT:\n{digest}\n\n\
         Focus on insights not covered by the summary and on important connections.",
        context_header(term, digest)
    )
}

/// The organizer sees both prior stages plus a raw excerpt so structure
/// decisions stay anchored in the source material.
pub fn organizer_input(term: &str, digest: &str, summary: &str, analysis: &str, excerpt: &str) -> String {
    format!(
        "{}\nTASK: Organize all available information into a clear hierarchy.\n\n\
         SUMMARY:\n{summary}\n\n\
         ANALYSIS:\n{analysis}\n\n\
         SOURCE EXCERPT:\n{excerpt}",
        context_header(term, digest)
    )
}

/// Briefing header for the final synthesis call
pub fn synthesis_briefing(topic: &str, stats: &RunStats) -> String {
    format!(
        "RESEARCH TOPIC: {topic}\n\
         TERMS COVERED: {}\n\
         MATERIAL VOLUME: {} characters\n\
         SOURCE: {}\n",
        stats.term_count, stats.char_volume, stats.source_file
    )
}

/// Full synthesizer prompt: briefing plus the combined per-term blocks
pub fn synthesis_input(topic: &str, stats: &RunStats, combined_blocks: &str) -> String {
    format!(
        "{}\nSPECIALIST FINDINGS PER TERM:\n{combined_blocks}\n\n\
         Integrate every finding above into one unified report on the topic.",
        synthesis_briefing(topic, stats)
    )
}

/// Prompt body for search-term generation
pub fn term_generation_input(topic: &str, count: usize) -> String {
    format!("Topic: {topic}\n\nGenerate exactly {count} search terms.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_header_counts() {
        let header = context_header("rust async", "one two three\nfour five");
        assert!(header.starts_with("SEARCH TERM: rust async\n"));
        assert!(header.contains("SOURCE SIZE: 5 words, 2 lines"));
    }

    #[test]
    fn test_stage_inputs_carry_prior_outputs() {
        let analyst = analyst_input("t", "digest text here", "the summary");
        assert!(analyst.contains("INITIAL SUMMARY:\nthe summary"));
        assert!(analyst.contains("FULL CONTENT:\ndigest text here"));

        let organizer = organizer_input("t", "digest", "sum", "ana", "excerpt");
        assert!(organizer.contains("SUMMARY:\nsum"));
        assert!(organizer.contains("ANALYSIS:\nana"));
        assert!(organizer.contains("SOURCE EXCERPT:\nexcerpt"));
    }

    #[test]
    fn test_synthesis_briefing_fields() {
        let stats = RunStats {
            term_count: 3,
            char_volume: 9000,
            source_file: "data_x.json".to_string(),
        };
        let briefing = synthesis_briefing("quantum computing", &stats);
        assert!(briefing.contains("RESEARCH TOPIC: quantum computing"));
        assert!(briefing.contains("TERMS COVERED: 3"));
        assert!(briefing.contains("9000 characters"));
    }

    #[test]
    fn test_term_generation_input() {
        let input = term_generation_input("space elevators", 5);
        assert!(input.contains("Topic: space elevators"));
        assert!(input.contains("exactly 5 search terms"));
    }
}
