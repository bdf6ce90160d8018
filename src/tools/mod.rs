//! Tool registration and dispatch.
//!
//! Tools are named callables taking one string input and returning a string
//! observation. The registry renders its listing into prompts verbatim and
//! dispatches parsed actions by name. A tool result is always a string —
//! tool-side problems come back as human-readable error text, never as an
//! error the loop has to handle.

mod search;

pub use search::SerpSearch;

use async_trait::async_trait;

/// A callable the agent can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, matched against parsed `name[input]` actions.
    fn name(&self) -> &str;

    /// One-line description rendered into the prompt's tool listing.
    fn description(&self) -> &str;

    /// Run the tool. Must not panic; failures are reported in the returned
    /// observation text.
    async fn invoke(&self, input: &str) -> String;
}

/// Adapter wrapping a plain closure as a [`Tool`].
pub struct FnTool {
    name: String,
    description: String,
    func: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl FnTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        func: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> String {
        (self.func)(input)
    }
}

/// Ordered collection of registered tools.
///
/// Registration order is preserved; registering a duplicate name replaces the
/// existing entry in place (last registration wins) with a warning.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            tracing::warn!(tool = %tool.name(), "Replacing already-registered tool");
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Render all registered tools as a listing for prompt interpolation.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- **{}**: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Look up a tool by name. Not finding one is not fatal; the caller
    /// substitutes a textual error observation.
    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_tool(name: &str) -> Box<FnTool> {
        Box::new(FnTool::new(name, format!("{} tool", name), |input| {
            format!("echo: {}", input)
        }))
    }

    #[tokio::test]
    async fn lookup_dispatches_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("echo"));

        let tool = registry.lookup("echo").expect("tool registered");
        assert_eq!(tool.invoke("hi").await, "echo: hi");
        // Repeated lookups resolve to the same callable.
        assert_eq!(
            registry.lookup("echo").unwrap().invoke("hi").await,
            "echo: hi"
        );
    }

    #[test]
    fn lookup_unknown_name_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.lookup("missing").is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_last_wins_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("first"));
        registry.register(Box::new(FnTool::new("echo", "v1", |_| "v1".to_string())));
        registry.register(Box::new(FnTool::new("echo", "v2", |_| "v2".to_string())));

        assert_eq!(registry.lookup("echo").unwrap().invoke("x").await, "v2");
        // Replacement keeps the original position in the listing.
        let listing = registry.describe();
        let first_pos = listing.find("first").unwrap();
        let echo_pos = listing.find("echo").unwrap();
        assert!(first_pos < echo_pos);
        assert!(listing.contains("- **echo**: v2"));
        assert!(!listing.contains("v1"));
    }

    #[test]
    fn describe_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("alpha"));
        registry.register(echo_tool("beta"));
        assert_eq!(
            registry.describe(),
            "- **alpha**: alpha tool\n- **beta**: beta tool"
        );
    }
}
