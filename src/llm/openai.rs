//! Streaming OpenAI-compatible chat-completions client.
//!
//! Issues a `stream: true` request and consumes the SSE byte stream
//! incrementally: lines are buffered until complete, `data:` payloads are
//! parsed as chunk JSON, and every `choices[0].delta.content` fragment is
//! concatenated in arrival order. Accumulation is pure; incremental display
//! goes through an optional [`TokenObserver`] so correctness never depends on
//! console output.
//!
//! Transport and provider failures are contained here: they are logged and
//! degraded to `None`, never raised past the [`LlmClient`] boundary.

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;

use crate::config::{Config, ConfigError};

use super::{ChatMessage, LlmClient};

/// Callback invoked with each streamed text fragment as it arrives.
pub type TokenObserver = Box<dyn Fn(&str) + Send + Sync>;

/// Explicit constructor arguments. Anything left `None` falls back to the
/// injected [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: reqwest::Client,
    observer: Option<TokenObserver>,
}

impl OpenAiClient {
    /// Build a client from explicit options, falling back to `config` for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` if model, API key, or base URL
    /// resolves to an empty value.
    pub fn new(opts: ClientOptions, config: &Config) -> Result<Self, ConfigError> {
        let model = opts.model.unwrap_or_else(|| config.model.clone());
        let api_key = opts.api_key.unwrap_or_else(|| config.api_key.clone());
        let base_url = opts.base_url.unwrap_or_else(|| config.base_url.clone());
        let timeout_secs = opts.timeout_secs.unwrap_or(config.timeout_secs);

        if model.is_empty() {
            return Err(ConfigError::MissingSetting("model".to_string()));
        }
        if api_key.is_empty() {
            return Err(ConfigError::MissingSetting("api_key".to_string()));
        }
        if base_url.is_empty() {
            return Err(ConfigError::MissingSetting("base_url".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            model,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            observer: None,
        })
    }

    /// Build a client straight from a resolved [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(ClientOptions::default(), config)
    }

    /// Install a callback that receives each streamed fragment as it arrives.
    pub fn with_token_observer(mut self, observer: TokenObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Model identifier this client sends.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn think(&self, messages: &[ChatMessage], temperature: f32) -> Option<String> {
        tracing::debug!(model = %self.model, "Calling chat completions");

        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "stream": true,
        });

        let response = match self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, detail = %detail, "Chat completion returned an error status");
            return None;
        }

        collect_deltas(response.bytes_stream(), self.observer.as_ref()).await
    }
}

/// Consume an SSE byte stream line by line, concatenating delta fragments in
/// arrival order.
///
/// Fragments split across network chunks are reassembled through the line
/// buffer; a trailing line without a terminator is flushed when the stream
/// ends. A broken stream degrades to `None`. Each accepted fragment is handed
/// to the observer before being appended.
async fn collect_deltas<S, B, E>(stream: S, observer: Option<&TokenObserver>) -> Option<String>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    futures::pin_mut!(stream);
    let mut buf: Vec<u8> = Vec::new();
    let mut collected = String::new();

    let accept = |fragment: String, collected: &mut String| {
        if let Some(observer) = observer {
            observer(&fragment);
        }
        collected.push_str(&fragment);
    };

    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!(error = %e, "Chat completion stream broke mid-response");
                return None;
            }
        };
        buf.extend_from_slice(chunk.as_ref());

        while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            let line = buf.drain(..=pos).collect::<Vec<u8>>();
            if let Some(fragment) = extract_delta(&line) {
                accept(fragment, &mut collected);
            }
        }
    }

    // Stream ended — flush any trailing unterminated line.
    if !buf.is_empty() {
        if let Some(fragment) = extract_delta(&buf) {
            accept(fragment, &mut collected);
        }
    }

    Some(collected)
}

/// One streamed chunk of a chat completion. Only the fields we read.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the text fragment from one SSE line.
///
/// Returns `None` for non-`data:` lines, the `[DONE]` terminator, unparseable
/// chunks, and chunks without delta content.
fn extract_delta(line: &[u8]) -> Option<String> {
    let trimmed = line
        .strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line);

    let payload = trimmed.strip_prefix(b"data: ").or_else(|| {
        trimmed
            .strip_prefix(b"data:")
            .filter(|rest| !rest.starts_with(b" "))
    })?;

    let payload = std::str::from_utf8(payload).ok()?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }

    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    chunk.choices.into_iter().next()?.delta.content
}
