//! Language model client abstraction.
//!
//! The loops only see [`LlmClient`]: one `think` call that takes an ordered
//! message list and either produces the full response text or nothing. "No
//! result" is `None`, never an error — callers must treat a `None` as "this
//! model call produced nothing usable" and degrade without crashing. An
//! empty-but-valid response stays distinguishable as `Some("")`.

mod openai;

pub use openai::{ClientOptions, OpenAiClient, TokenObserver};

use async_trait::async_trait;
use serde::Serialize;

/// Message role in a chat-completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role/content pair sent to the model.
///
/// Built fresh per call; the ReAct loop renders prompt plus history into one
/// user message rather than keeping a multi-turn session.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Boundary to the language model provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one chat completion and return the full concatenated response
    /// text, or `None` when the call failed.
    async fn think(&self, messages: &[ChatMessage], temperature: f32) -> Option<String>;
}
