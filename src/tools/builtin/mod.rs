//! Builtin tool adapters
//!
//! Each adapter lives in its own module with response extraction separated
//! from I/O so the formatting rules stay unit-testable.

use crate::tools::ToolError;
use std::time::Duration;

pub mod arxiv_search;
pub mod chat_relay;
pub mod context_search;
pub mod user_prompt;
pub mod web_search;

pub use arxiv_search::ArxivSearchTool;
pub use chat_relay::ChatRelayTool;
pub use context_search::{ContextSearchTool, DocumentRetriever, RetrievedDocument};
pub use user_prompt::UserPromptTool;
pub use web_search::WebSearchTool;

/// Shared blocking HTTP client with the standard request timeout.
///
/// Adapters are stateless, so the client is built per call rather than held
/// across invocations.
pub(crate) fn http_client() -> Result<reqwest::blocking::Client, ToolError> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?)
}
