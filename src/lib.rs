//! Agent Toolbelt - external-action tools for LLM agents
//!
//! A small set of adapters an agent framework can hand to its model: web
//! search, Arxiv paper search, prompting the human operator, relaying a
//! question to a remote chat service, and searching an internal document
//! retriever. Every adapter speaks the same contract: a query string goes
//! in, a formatted text answer (or an error) comes out.
//!
//! # Overview
//!
//! - [`Tool`] - the string-in/string-out contract plus a `describe()` the
//!   host uses to decide when to invoke a tool
//! - [`build_tools`] - assembles the available tool set from configuration;
//!   tools whose credentials are missing are skipped with a warning
//! - [`AgentConfig`] - configuration constructed once at process start and
//!   passed explicitly into tool construction
//!
//! # Quick Start
//!
//! ```rust
//! use agent_toolbelt::{build_tools, AgentConfig, Tool};
//!
//! // Build whatever tools the current environment supports. The user
//! // prompt tool is always available; search and chat relay appear only
//! // when their credentials resolve.
//! let config = AgentConfig::default();
//! let tools = build_tools(None, &config);
//!
//! for tool in &tools {
//!     let description = tool.describe();
//!     println!("{}: {}", description.name, description.description);
//! }
//! ```

pub mod config;
pub mod observability;
pub mod tools;

// Re-export the host-facing surface
pub use config::{AgentConfig, ConfigError};
pub use tools::builtin::{
    ArxivSearchTool, ChatRelayTool, ContextSearchTool, DocumentRetriever, RetrievedDocument,
    UserPromptTool, WebSearchTool,
};
pub use tools::registry::build_tools;
pub use tools::{TokenStream, Tool, ToolDescription, ToolError, ToolOutput};
