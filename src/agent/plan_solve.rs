//! Plan-and-Solve loop: decompose once, then execute sequentially.

use std::sync::Arc;

use crate::llm::{ChatMessage, LlmClient};
use crate::parser;

use super::prompt;

/// Asks the model to decompose a question into an ordered subtask plan.
pub struct Planner {
    llm: Arc<dyn LlmClient>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Produce the plan for a question.
    ///
    /// An empty result means planning failed (model gave no response, fence
    /// missing, malformed list literal) — never "zero steps intentionally".
    pub async fn plan(&self, question: &str) -> Vec<String> {
        tracing::info!("Generating action plan");

        let messages = [ChatMessage::user(prompt::render_planner(question))];
        let response = self.llm.think(&messages, 0.0).await.unwrap_or_default();

        let plan = parser::parse_plan(&response);
        if plan.is_empty() {
            tracing::warn!(response = %response, "Failed to parse a plan from the model response");
        } else {
            tracing::info!(steps = plan.len(), "Plan generated");
        }
        plan
    }
}

/// Resolves each plan step in order, carrying a cumulative transcript.
pub struct Executor {
    llm: Arc<dyn LlmClient>,
}

impl Executor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Execute every step of the plan exactly once, in order.
    ///
    /// Best-effort per step: a failed model call is coerced to an empty
    /// result and the loop continues. Returns the last step's result
    /// verbatim. Callers must not invoke this with an empty plan.
    pub async fn execute(&self, question: &str, plan: &[String]) -> String {
        let mut transcript = String::new();
        let mut last_result = String::new();

        for (i, step) in plan.iter().enumerate() {
            tracing::info!(step = i + 1, total = plan.len(), task = %step, "Executing plan step");

            let messages = [ChatMessage::user(prompt::render_executor(
                question,
                plan,
                &transcript,
                step,
            ))];
            let result = self.llm.think(&messages, 0.0).await.unwrap_or_default();

            transcript.push_str(&format!("Step {}: {}\nResult: {}\n\n", i + 1, step, result));
            tracing::info!(step = i + 1, result = %result, "Step completed");
            last_result = result;
        }

        last_result
    }
}

/// Two-phase orchestrator: plan, then execute.
pub struct PlanAndSolveAgent {
    planner: Planner,
    executor: Executor,
}

impl PlanAndSolveAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            planner: Planner::new(llm.clone()),
            executor: Executor::new(llm),
        }
    }

    /// Run both phases on one question. `None` means planning failed; the
    /// executor is never invoked on an empty plan.
    pub async fn run(&self, question: &str) -> Option<String> {
        tracing::info!(question = %question, "Starting plan-and-solve run");

        let plan = self.planner.plan(question).await;
        if plan.is_empty() {
            tracing::warn!("No usable plan, aborting run");
            return None;
        }

        let answer = self.executor.execute(question, &plan).await;
        tracing::info!(answer = %answer, "Run complete");
        Some(answer)
    }
}
