//! Integration tests for the Arxiv search tool
//!
//! The mock server stands in for the Arxiv export endpoint; the assertions
//! cover the query-string shape and the title/summary pairing rules.

use agent_toolbelt::{AgentConfig, ArxivSearchTool, Tool, ToolError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn arxiv_tool(base_url: &str) -> ArxivSearchTool {
    let mut config = AgentConfig::default();
    config.arxiv.base_url = base_url.to_string();
    ArxivSearchTool::new(&config)
}

async fn run_arxiv(tool: ArxivSearchTool, query: &str) -> Result<String, ToolError> {
    let query = query.to_string();
    tokio::task::spawn_blocking(move || tool.run(&query).and_then(|output| output.into_text()))
        .await
        .expect("arxiv task panicked")
}

#[tokio::test]
async fn test_title_summary_pairs_are_joined_with_a_single_space() {
    let server = MockServer::start().await;

    let feed = "<feed>\
                <entry><title>A</title><summary>sa</summary></entry>\
                <entry><title>B</title><summary>sb</summary></entry>\
                </feed>";
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;

    let result = run_arxiv(arxiv_tool(&server.uri()), "anything").await.unwrap();

    assert_eq!(result, "Title: A\nSummary: sa Title: B\nSummary: sb");
}

#[tokio::test]
async fn test_query_is_form_encoded_with_fixed_paging() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<feed></feed>"))
        .expect(1)
        .mount(&server)
        .await;

    run_arxiv(arxiv_tool(&server.uri()), "large language models")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(
        query,
        "search_query=all:large+language+models&start=0&max_results=10"
    );
}

#[tokio::test]
async fn test_mismatched_title_and_summary_counts_are_an_error() {
    let server = MockServer::start().await;

    // A realistic Atom payload: the feed-level <title> has no summary.
    let feed = "<feed><title>Query results</title>\
                <entry><title>A</title><summary>sa</summary></entry>\
                </feed>";
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;

    let result = run_arxiv(arxiv_tool(&server.uri()), "anything").await;

    match result {
        Err(ToolError::MismatchedFeed { titles, summaries }) => {
            assert_eq!(titles, 2);
            assert_eq!(summaries, 1);
        }
        other => panic!("expected MismatchedFeed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_feed_yields_an_empty_answer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<feed></feed>"))
        .mount(&server)
        .await;

    let result = run_arxiv(arxiv_tool(&server.uri()), "nothing matches")
        .await
        .unwrap();

    assert_eq!(result, "");
}

#[tokio::test]
async fn test_upstream_error_status_propagates_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = run_arxiv(arxiv_tool(&server.uri()), "anything").await;

    assert!(matches!(result, Err(ToolError::Http(_))));
}
