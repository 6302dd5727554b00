//! Tool contract and tool-set construction
//!
//! A tool is a named capability with a single operation: take a query
//! string, perform one external action, return formatted text. Tools are
//! stateless adapters - each `run` builds its own request, calls the
//! upstream service, and formats the response. Nothing is cached or
//! retried.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod builtin;
pub mod registry;

/// The capability contract consumed by the host agent framework.
///
/// Every operation is synchronous and blocks until the upstream service
/// answers or fails. Asynchronous invocation is not supported by any
/// adapter; `run_async` exists so hosts with an async dispatch path get an
/// immediate, explicit failure instead of a hang or a panic.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Identity shown to the host framework when deciding which tool to
    /// invoke for a task.
    fn describe(&self) -> ToolDescription;

    /// Execute the tool against a single query.
    fn run(&self, query: &str) -> Result<ToolOutput, ToolError>;

    /// Non-blocking execution. Always fails: no adapter supports it.
    async fn run_async(&self, query: &str) -> Result<ToolOutput, ToolError> {
        let _ = query;
        Err(ToolError::AsyncUnsupported {
            tool: self.describe().name,
        })
    }
}

/// Name and invocation guidance for a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
}

/// What a tool invocation produced.
///
/// Every adapter returns `Text`. The chat relay returns `Stream` when its
/// streaming flag is set; callers must be prepared for either shape.
pub enum ToolOutput {
    /// The complete formatted answer.
    Text(String),
    /// Partial answer fragments, delivered as the upstream service emits
    /// them.
    Stream(TokenStream),
}

impl ToolOutput {
    /// The answer text, if this output is already complete.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolOutput::Text(text) => Some(text),
            ToolOutput::Stream(_) => None,
        }
    }

    /// Resolve to a single string, draining a stream by concatenating its
    /// fragments. The first stream error aborts the drain.
    pub fn into_text(self) -> Result<String, ToolError> {
        match self {
            ToolOutput::Text(text) => Ok(text),
            ToolOutput::Stream(stream) => {
                let mut text = String::new();
                for fragment in stream {
                    text.push_str(&fragment?);
                }
                Ok(text)
            }
        }
    }
}

impl fmt::Debug for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ToolOutput::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A blocking iterator over partial answer fragments.
pub struct TokenStream {
    inner: Box<dyn Iterator<Item = Result<String, ToolError>> + Send>,
}

impl TokenStream {
    pub fn new(inner: impl Iterator<Item = Result<String, ToolError>> + Send + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Iterator for TokenStream {
    type Item = Result<String, ToolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenStream(..)")
    }
}

/// Tool invocation errors.
///
/// Missing credentials degrade at registry-build time (the tool is simply
/// not offered); everything here is a per-call failure that propagates to
/// the host unchanged. No variant is retried.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} is not configured: {reason}")]
    NotConfigured { tool: String, reason: String },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
    #[error("Paper feed returned {titles} titles but {summaries} summaries")]
    MismatchedFeed { titles: usize, summaries: usize },
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("{tool} does not support asynchronous execution")]
    AsyncUnsupported { tool: String },
    #[error("Input stream closed before a line was supplied")]
    InputClosed,
}
