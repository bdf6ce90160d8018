//! Prompt templates for the agent loops.
//!
//! Each render re-sends everything the model needs — tool listing, question,
//! full history — inside one user message, so a model call never depends on
//! session state.

/// Build the per-step ReAct prompt.
pub(crate) fn render_react(tools: &str, question: &str, history: &str) -> String {
    format!(
        r#"You are an assistant capable of calling external tools.

Available tools:
{tools}

Respond strictly in the following format:

Thought: your reasoning - analyze the problem, break it down, and plan the next move.
Action: the action to take, exactly one of:
- `{{tool_name}}[{{tool_input}}]`: call one of the available tools.
- `Finish[final answer]`: when you have gathered enough information to answer the question.

Now solve the following problem:
Question: {question}
History: {history}"#,
        tools = tools,
        question = question,
        history = history
    )
}

/// Build the one-shot planning prompt.
pub(crate) fn render_planner(question: &str) -> String {
    format!(
        r#"You are a top-tier AI planning expert. Your task is to decompose the user's complex
question into an action plan made of simple steps. Each step must be an independent,
executable subtask, and the steps must be in strict logical order.
Your output must be a Python list in which every element is a string describing one subtask.

Question: {question}

Output your plan in exactly this format - the ```python and ``` fences are required:
```python
["step 1", "step 2", "step 3", ...]
```"#,
        question = question
    )
}

/// Build the per-step executor prompt with the running transcript.
pub(crate) fn render_executor(
    question: &str,
    plan: &[String],
    transcript: &str,
    current_step: &str,
) -> String {
    format!(
        r#"You are a top-tier AI execution expert. Your task is to follow the given plan and
solve the problem step by step. You receive the original question, the full plan, and
the steps completed so far with their results.
Focus on the current step only, and output only its answer - no extra explanation.

# Original question:
{question}

# Full plan:
{plan:?}

# Completed steps and results:
{transcript}

# Current step:
{current_step}

Output only the answer for the current step:"#,
        question = question,
        plan = plan,
        transcript = if transcript.is_empty() {
            "none"
        } else {
            transcript
        },
        current_step = current_step
    )
}
