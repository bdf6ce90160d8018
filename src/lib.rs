//! # Pocket Agent
//!
//! Minimal LLM-driven agent loops.
//!
//! This library provides:
//! - A ReAct loop: alternating free-text reasoning, a single tool or finish
//!   action, and an observation, until completion or a step budget runs out
//! - A Plan-and-Solve loop: one upfront decomposition into ordered subtasks,
//!   then sequential resolution of each
//! - A streaming OpenAI-compatible chat-completions client behind the
//!   [`llm::LlmClient`] trait
//! - A small tool registry with a SerpAPI-backed web search tool
//!
//! ## Architecture
//!
//! Both loops follow the same pattern:
//! 1. Render a prompt from the question, tool listing, and accumulated history
//! 2. Call the LLM, parse the free-text response with fixed patterns
//! 3. Dispatch the parsed action (or record the step result)
//! 4. Feed the observation back into the history, repeat
//!
//! The model call is stateless: every step re-sends the full history inside a
//! single rendered prompt, so a run is fully replayable from the history list
//! alone.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pocket_agent::{agent::ReActAgent, config::Config, llm::OpenAiClient, tools::ToolRegistry};
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(OpenAiClient::from_config(&config)?);
//! let mut agent = ReActAgent::new(llm, registry, config.max_steps);
//! let answer = agent.run("What is the latest GPU model from Nvidia?").await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod parser;
pub mod tools;

pub use config::Config;
