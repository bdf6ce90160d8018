//! ReAct loop implementation.

use std::sync::Arc;

use crate::llm::{ChatMessage, LlmClient};
use crate::parser::{self, ParsedAction};
use crate::tools::ToolRegistry;

use super::prompt;

/// Reason-and-act agent.
///
/// Each step renders the full prompt (tool listing, question, accumulated
/// history), asks the model once, parses one Thought/Action pair, and either
/// finishes, dispatches a tool, or skips. History is owned by the instance
/// and reset at the start of every [`run`](ReActAgent::run); one instance
/// serves one question at a time.
pub struct ReActAgent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_steps: usize,
    history: Vec<String>,
}

impl ReActAgent {
    /// Create a new agent over the given model client and tool registry.
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, max_steps: usize) -> Self {
        Self {
            llm,
            tools,
            max_steps,
            history: Vec::new(),
        }
    }

    /// Accumulated `Action:`/`Observation:` lines of the current or last run.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run the loop on one question.
    ///
    /// Returns the extracted final answer, or `None` when the run aborted:
    /// model gave no response, the response had no `Action:` line, or the
    /// step budget ran out.
    pub async fn run(&mut self, question: &str) -> Option<String> {
        self.history.clear();

        for step in 1..=self.max_steps {
            tracing::debug!(step, max_steps = self.max_steps, "ReAct step");

            let prompt = prompt::render_react(
                &self.tools.describe(),
                question,
                &self.history.join("\n"),
            );
            let messages = [ChatMessage::user(prompt)];

            let Some(response) = self.llm.think(&messages, 0.0).await else {
                tracing::warn!("Model returned no response, aborting run");
                return None;
            };

            let parsed = parser::parse_response(&response);
            if let Some(thought) = &parsed.thought {
                tracing::info!(thought = %thought, "Thought");
            }
            let Some(action) = parsed.action else {
                tracing::warn!("No Action line in model response, aborting run");
                return None;
            };

            match parser::parse_action(&action) {
                ParsedAction::Finish(answer) => {
                    tracing::info!(answer = %answer, "Final answer");
                    return Some(answer);
                }
                ParsedAction::Malformed => {
                    // Skip, don't crash: the step consumes a budget slot but
                    // the history stays untouched.
                    tracing::warn!(action = %action, "Unparseable tool call, skipping step");
                    continue;
                }
                ParsedAction::ToolCall { name, input } => {
                    tracing::info!(tool = %name, input = %input, "Acting");

                    let observation = match self.tools.lookup(&name) {
                        Some(tool) => tool.invoke(&input).await,
                        None => format!("Error: no tool named '{}' is registered.", name),
                    };
                    tracing::info!(observation = %observation, "Observation");

                    self.history.push(format!("Action: {}", action));
                    self.history.push(format!("Observation: {}", observation));
                }
            }
        }

        tracing::warn!("Step budget exhausted without a final answer");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::ScriptedLlm;
    use crate::tools::FnTool;

    fn registry_with_echo() -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(Box::new(FnTool::new(
            "echo",
            "Echoes its input.",
            |input| format!("echo: {}", input),
        )));
        tools
    }

    #[tokio::test]
    async fn no_response_on_first_step_aborts_with_empty_history() {
        let llm = Arc::new(ScriptedLlm::new(vec![None]));
        let mut agent = ReActAgent::new(llm.clone(), registry_with_echo(), 5);

        assert_eq!(agent.run("q").await, None);
        assert!(agent.history().is_empty());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn missing_action_line_aborts_without_history() {
        let llm = Arc::new(ScriptedLlm::new(vec![Some("Thought: hmm, no action here")]));
        let mut agent = ReActAgent::new(llm, registry_with_echo(), 5);

        assert_eq!(agent.run("q").await, None);
        assert!(agent.history().is_empty());
    }

    #[tokio::test]
    async fn finish_short_circuits_with_exact_answer() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Thought: search first\nAction: echo[probe]"),
            Some("Thought: done\nAction: Finish[The answer is 42]"),
        ]));
        let mut agent = ReActAgent::new(llm.clone(), registry_with_echo(), 5);

        assert_eq!(agent.run("q").await.as_deref(), Some("The answer is 42"));
        // One tool step before the finish: exactly one Action/Observation pair.
        assert_eq!(agent.history().len(), 2);
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn tool_step_appends_action_and_observation() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Action: echo[hello]"),
            Some("Action: Finish[done]"),
        ]));
        let mut agent = ReActAgent::new(llm.clone(), registry_with_echo(), 5);

        agent.run("q").await;
        assert_eq!(agent.history()[0], "Action: echo[hello]");
        assert_eq!(agent.history()[1], "Observation: echo: hello");
        // The second prompt carries the first step's transcript.
        let prompts = llm.prompts();
        assert!(prompts[1].contains("Action: echo[hello]"));
        assert!(prompts[1].contains("Observation: echo: hello"));
    }

    #[tokio::test]
    async fn unknown_tool_appends_error_observation_and_consumes_step() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Action: missing[x]"),
            Some("Action: Finish[ok]"),
        ]));
        let mut agent = ReActAgent::new(llm, registry_with_echo(), 5);

        assert_eq!(agent.run("q").await.as_deref(), Some("ok"));
        assert_eq!(agent.history().len(), 2);
        assert_eq!(agent.history()[0], "Action: missing[x]");
        assert_eq!(
            agent.history()[1],
            "Observation: Error: no tool named 'missing' is registered."
        );
    }

    #[tokio::test]
    async fn malformed_action_skips_step_without_history() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Action: not a tool shape"),
            Some("Action: Finish[recovered]"),
        ]));
        let mut agent = ReActAgent::new(llm.clone(), registry_with_echo(), 5);

        assert_eq!(agent.run("q").await.as_deref(), Some("recovered"));
        assert!(agent.history().is_empty());
        // The malformed step still consumed a model call.
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn history_grows_two_entries_per_tool_step() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Action: echo[a]"),
            Some("Action: echo[b]"),
            Some("Action: echo[c]"),
        ]));
        let mut agent = ReActAgent::new(llm, registry_with_echo(), 3);

        // Budget exhausted without a Finish: no answer, 2 entries per step.
        assert_eq!(agent.run("q").await, None);
        assert_eq!(agent.history().len(), 6);
    }

    #[tokio::test]
    async fn budget_exhaustion_returns_none() {
        let llm = Arc::new(ScriptedLlm::new(vec![Some("Action: echo[x]"); 2]));
        let mut agent = ReActAgent::new(llm.clone(), registry_with_echo(), 2);

        assert_eq!(agent.run("q").await, None);
        assert_eq!(llm.calls(), 2);
    }

    #[tokio::test]
    async fn run_resets_history_between_runs() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Some("Action: echo[first]"),
            Some("Action: Finish[one]"),
            Some("Action: Finish[two]"),
        ]));
        let mut agent = ReActAgent::new(llm, registry_with_echo(), 5);

        assert_eq!(agent.run("q1").await.as_deref(), Some("one"));
        assert_eq!(agent.history().len(), 2);
        assert_eq!(agent.run("q2").await.as_deref(), Some("two"));
        assert!(agent.history().is_empty());
    }
}
