//! Specialized Agents
//!
//! Thin role wrappers over the generation client. Each agent pairs a fixed
//! instruction with an output budget tuned for its place in the pipeline.

use std::sync::Arc;
use tracing::debug;

use crate::ai::client::GenerationClient;
use crate::ai::prompts;
use crate::constants::agents as agent_constants;

/// A named role with a fixed instruction and output budget
pub struct Agent {
    name: &'static str,
    instruction: &'static str,
    output_tokens: u32,
    client: Arc<GenerationClient>,
}

impl Agent {
    pub fn new(
        name: &'static str,
        instruction: &'static str,
        output_tokens: u32,
        client: Arc<GenerationClient>,
    ) -> Self {
        Self {
            name,
            instruction,
            output_tokens,
            client,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Run this agent on the given input. Never fails; see
    /// [`GenerationClient::generate`] for the error-marker contract.
    pub async fn run(&self, input: &str) -> String {
        debug!(
            agent = self.name,
            input_chars = input.chars().count(),
            "Running agent"
        );
        self.client
            .generate(self.instruction, input, self.output_tokens)
            .await
    }
}

/// The full roster for one report run
pub struct AgentSet {
    pub summarizer: Agent,
    pub analyst: Agent,
    pub organizer: Agent,
    pub synthesizer: Agent,
    pub term_generator: Agent,
}

impl AgentSet {
    /// Build the standard roster sharing one client
    pub fn specialized(client: Arc<GenerationClient>) -> Self {
        Self {
            summarizer: Agent::new(
                "summarizer",
                prompts::SUMMARIZER_INSTRUCTION,
                agent_constants::SUMMARIZER_TOKENS,
                Arc::clone(&client),
            ),
            analyst: Agent::new(
                "analyst",
                prompts::ANALYST_INSTRUCTION,
                agent_constants::ANALYST_TOKENS,
                Arc::clone(&client),
            ),
            organizer: Agent::new(
                "organizer",
                prompts::ORGANIZER_INSTRUCTION,
                agent_constants::ORGANIZER_TOKENS,
                Arc::clone(&client),
            ),
            synthesizer: Agent::new(
                "synthesizer",
                prompts::SYNTHESIZER_INSTRUCTION,
                agent_constants::SYNTHESIZER_TOKENS,
                Arc::clone(&client),
            ),
            term_generator: Agent::new(
                "term_generator",
                prompts::TERM_GENERATOR_INSTRUCTION,
                agent_constants::TERM_GENERATOR_TOKENS,
                client,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::tests::ScriptedProvider;
    use crate::config::GenerationConfig;

    fn agent_set(provider: Arc<ScriptedProvider>) -> AgentSet {
        let client = Arc::new(GenerationClient::new(provider, GenerationConfig::default()));
        AgentSet::specialized(client)
    }

    #[tokio::test]
    async fn test_agent_passes_output_budget() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedProvider::ok("summary")]));
        let agents = agent_set(provider.clone());

        let out = agents.summarizer.run("some text").await;

        assert_eq!(out, "summary");
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].params.max_tokens, 600);
        assert_eq!(requests[0].instruction, prompts::SUMMARIZER_INSTRUCTION);
    }

    #[tokio::test]
    async fn test_roster_budgets_differ_by_role() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedProvider::ok("a"),
            ScriptedProvider::ok("b"),
            ScriptedProvider::ok("c"),
        ]));
        let agents = agent_set(provider.clone());

        agents.analyst.run("text").await;
        agents.organizer.run("text").await;
        agents.synthesizer.run("text").await;

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].params.max_tokens, 800);
        assert_eq!(requests[1].params.max_tokens, 700);
        assert_eq!(requests[2].params.max_tokens, 2000);
    }
}
