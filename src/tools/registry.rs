//! Conditional tool-set construction
//!
//! Which tools the host gets depends on what the environment provides: the
//! user prompt tool is always available, the credentialed tools only when
//! their credentials resolve, and context search only when the host hands
//! over a retriever. Missing credentials are never an error - the entry is
//! skipped with a warning and the remaining tools are offered as-is.

use crate::config::AgentConfig;
use crate::tools::builtin::{
    ChatRelayTool, ContextSearchTool, DocumentRetriever, UserPromptTool, WebSearchTool,
};
use crate::tools::Tool;
use std::sync::Arc;
use tracing::warn;

/// Everything a registration may draw on while building its tool.
struct BuildContext<'a> {
    config: &'a AgentConfig,
    memory: Option<&'a Arc<dyn DocumentRetriever>>,
}

/// One row of the registration table: a requirement predicate, a
/// constructor, and the warning to log when the requirement fails.
struct Registration {
    name: &'static str,
    required: fn(&BuildContext) -> bool,
    build: fn(&BuildContext) -> Option<Box<dyn Tool>>,
    skip_warning: &'static str,
}

const REGISTRATIONS: &[Registration] = &[
    Registration {
        name: "user_prompt",
        required: |_| true,
        build: |_| Some(Box::new(UserPromptTool::new())),
        skip_warning: "",
    },
    Registration {
        name: "web_search",
        required: |ctx| ctx.config.search_api_key().is_some(),
        build: |ctx| Some(Box::new(WebSearchTool::new(ctx.config))),
        skip_warning: "no search API key found in the environment, skipping the web search tool",
    },
    Registration {
        name: "chat_relay",
        required: |ctx| {
            ctx.config.chat_email().is_some() && ctx.config.chat_password().is_some()
        },
        build: |ctx| Some(Box::new(ChatRelayTool::new(ctx.config))),
        skip_warning:
            "no chat service email and password found in the environment, skipping the chat relay tool",
    },
    Registration {
        name: "context_search",
        required: |ctx| ctx.memory.is_some(),
        build: |ctx| {
            ctx.memory
                .map(|memory| Box::new(ContextSearchTool::new(Arc::clone(memory))) as Box<dyn Tool>)
        },
        skip_warning: "",
    },
];

/// Build the list of available tools.
///
/// `memory` is the host's document retriever, when it has one; without it
/// the context search tool is left out. Partial tool sets are valid.
pub fn build_tools(
    memory: Option<Arc<dyn DocumentRetriever>>,
    config: &AgentConfig,
) -> Vec<Box<dyn Tool>> {
    let ctx = BuildContext {
        config,
        memory: memory.as_ref(),
    };

    let mut tools = Vec::new();
    for registration in REGISTRATIONS {
        if !(registration.required)(&ctx) {
            if !registration.skip_warning.is_empty() {
                warn!(tool = registration.name, "{}", registration.skip_warning);
            }
            continue;
        }
        if let Some(tool) = (registration.build)(&ctx) {
            tools.push(tool);
        }
    }
    tools
}
