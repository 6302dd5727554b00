//! Integration tests for tool-set construction
//!
//! Which tools come out of the registry depends on credentials and on
//! whether the host supplies a document retriever. Each test uses its own
//! environment variable names so the cases stay independent.

use agent_toolbelt::{
    build_tools, AgentConfig, DocumentRetriever, RetrievedDocument, Tool, ToolError,
};
use std::sync::Arc;

struct EmptyRetriever;

impl DocumentRetriever for EmptyRetriever {
    fn relevant_documents(&self, _query: &str) -> Vec<RetrievedDocument> {
        Vec::new()
    }
}

fn config_with_envs(tag: &str) -> AgentConfig {
    let mut config = AgentConfig::default();
    config.search.api_key_env = format!("REGISTRY_TEST_SEARCH_{tag}");
    config.chat.email_env = format!("REGISTRY_TEST_EMAIL_{tag}");
    config.chat.password_env = format!("REGISTRY_TEST_PASS_{tag}");
    config
}

fn tool_names(tools: &[Box<dyn Tool>]) -> Vec<String> {
    tools.iter().map(|tool| tool.describe().name).collect()
}

#[test]
fn test_missing_search_key_omits_web_search() {
    let config = config_with_envs("NO_SEARCH");

    let names = tool_names(&build_tools(None, &config));

    assert!(!names.contains(&"web_search".to_string()));
    assert!(names.contains(&"user_prompt".to_string()));
}

#[test]
fn test_chat_credentials_enable_chat_relay() {
    let config = config_with_envs("CHAT_OK");
    std::env::set_var("REGISTRY_TEST_EMAIL_CHAT_OK", "user@example.com");
    std::env::set_var("REGISTRY_TEST_PASS_CHAT_OK", "hunter2");

    let names = tool_names(&build_tools(None, &config));

    assert!(names.contains(&"chat_relay".to_string()));
}

#[test]
fn test_retriever_handle_enables_context_search() {
    let config = config_with_envs("RETRIEVER");

    let without = tool_names(&build_tools(None, &config));
    assert!(!without.contains(&"context_search".to_string()));

    let with = tool_names(&build_tools(Some(Arc::new(EmptyRetriever)), &config));
    assert!(with.contains(&"context_search".to_string()));
}

#[test]
fn test_full_configuration_builds_every_tool() {
    let config = config_with_envs("FULL");
    std::env::set_var("REGISTRY_TEST_SEARCH_FULL", "key");
    std::env::set_var("REGISTRY_TEST_EMAIL_FULL", "user@example.com");
    std::env::set_var("REGISTRY_TEST_PASS_FULL", "hunter2");

    let names = tool_names(&build_tools(Some(Arc::new(EmptyRetriever)), &config));

    assert_eq!(
        names,
        vec!["user_prompt", "web_search", "chat_relay", "context_search"]
    );
}

#[tokio::test]
async fn test_no_tool_supports_asynchronous_invocation() {
    let config = config_with_envs("ASYNC");
    std::env::set_var("REGISTRY_TEST_SEARCH_ASYNC", "key");
    std::env::set_var("REGISTRY_TEST_EMAIL_ASYNC", "user@example.com");
    std::env::set_var("REGISTRY_TEST_PASS_ASYNC", "hunter2");

    let tools = build_tools(Some(Arc::new(EmptyRetriever)), &config);
    assert_eq!(tools.len(), 4);

    for tool in tools {
        let result = tool.run_async("anything").await;
        match result {
            Err(ToolError::AsyncUnsupported { tool: name }) => {
                assert_eq!(name, tool.describe().name);
            }
            other => panic!("expected AsyncUnsupported, got {other:?}"),
        }
    }
}
