//! Best-effort structured decoding of model responses.
//!
//! The model contract is semi-structured free text, so extraction is fixed
//! line-prefix patterns, centralized here and nowhere else. Only the FIRST
//! match per pattern counts; anything after the first `Action:` line is
//! ignored. Bracket payloads are greedy and non-nested — a payload containing
//! a literal `]` is unsupported.
//!
//! Every function returns a tagged result instead of raising: a missing field
//! is `None`, an unrecognizable action is [`ParsedAction::Malformed`], and an
//! unparseable plan is the empty list.

use once_cell::sync::Lazy;
use regex::Regex;

static THOUGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Thought:(.*)$").expect("valid thought pattern"));

static ACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Action:(.*)$").expect("valid action pattern"));

static FINISH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Finish\[(.*)\]").expect("valid finish pattern"));

static TOOL_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\[(.*)\]").expect("valid tool call pattern"));

/// Thought/Action fields of one ReAct response. Each is independently
/// optional: a missing Thought is tolerated, a missing Action terminates the
/// step as unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub thought: Option<String>,
    pub action: Option<String>,
}

/// Decomposition of one `Action:` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    /// `Finish[answer]` — terminate the run with this answer.
    Finish(String),
    /// `name[input]` — dispatch to a registered tool.
    ToolCall { name: String, input: String },
    /// No recognizable action shape; the step is skipped, the run continues.
    Malformed,
}

/// Extract the first `Thought:` and `Action:` lines from a response.
pub fn parse_response(text: &str) -> ParsedResponse {
    let first_capture = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    ParsedResponse {
        thought: first_capture(&THOUGHT_RE),
        action: first_capture(&ACTION_RE),
    }
}

/// Decompose an action value into a finish or a tool invocation.
pub fn parse_action(action: &str) -> ParsedAction {
    let action = action.trim();

    if action.starts_with("Finish") {
        if let Some(captures) = FINISH_RE.captures(action) {
            return ParsedAction::Finish(captures[1].to_string());
        }
        return ParsedAction::Malformed;
    }

    match TOOL_CALL_RE.captures(action) {
        Some(captures) => ParsedAction::ToolCall {
            name: captures[1].to_string(),
            input: captures[2].to_string(),
        },
        None => ParsedAction::Malformed,
    }
}

/// Parse a planner response into an ordered list of subtask strings.
///
/// The planner is asked to emit a list literal inside a ```` ```python ````
/// fence. Extraction takes the substring between the opening fence and the
/// first closing fence and parses it as a flat list of quoted strings. Any
/// failure — fence missing, malformed literal, non-list content — yields the
/// empty list, which callers must read as "planning failed", not "zero steps
/// intentionally".
pub fn parse_plan(text: &str) -> Vec<String> {
    extract_fenced_block(text)
        .and_then(parse_list_literal)
        .unwrap_or_default()
}

/// Substring between the opening ```` ```python ```` fence and the first
/// closing ```` ``` ```` after it, trimmed.
fn extract_fenced_block(text: &str) -> Option<&str> {
    let after_open = text.split("```python").nth(1)?;
    let inner = after_open.split("```").next()?;
    Some(inner.trim())
}

/// Parse a flat Python-style list literal of single- or double-quoted
/// strings, e.g. `['a', "b"]`. Returns `None` for anything else.
fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(&quote) = chars.peek() else {
            // End of input: valid only at the start or right after a comma
            // (trailing commas are accepted, as literal_eval accepts them).
            return Some(items);
        };
        if quote != '\'' && quote != '"' {
            return None;
        }
        chars.next();

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => match chars.next()? {
                    'n' => item.push('\n'),
                    't' => item.push('\t'),
                    'r' => item.push('\r'),
                    '\\' => item.push('\\'),
                    '\'' => item.push('\''),
                    '"' => item.push('"'),
                    // Anything else (\x41, \u…, stray backslashes) is outside
                    // the accepted grammar: fail the whole literal.
                    _ => return None,
                },
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            Some(',') => continue,
            None => return Some(items),
            Some(_) => return None,
        }
    }
}
