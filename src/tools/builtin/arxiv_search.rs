//! Arxiv paper search tool implementation
//!
//! Queries the Arxiv export endpoint and extracts title/summary pairs from
//! the Atom XML body by pattern matching. The i-th title is paired with the
//! i-th summary in document order; a feed where the counts disagree is
//! reported as an error rather than truncated.

use crate::config::AgentConfig;
use crate::tools::builtin::http_client;
use crate::tools::{Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const NAME: &str = "arxiv_search";
const MAX_RESULTS: usize = 10;

static TITLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<title>(.*?)</title>").unwrap());
static SUMMARY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<summary>(.*?)</summary>").unwrap());

/// Paper search against the Arxiv export API.
pub struct ArxivSearchTool {
    base_url: String,
}

impl Default for ArxivSearchTool {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

impl ArxivSearchTool {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            base_url: config.arxiv.base_url.clone(),
        }
    }

    fn query_url(&self, query: &str) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(query.trim().as_bytes()).collect();
        format!(
            "{}/api/query?search_query=all:{}&start=0&max_results={}",
            self.base_url, encoded, MAX_RESULTS
        )
    }
}

/// Extract `(title, summary)` pairs from the feed body.
fn extract_papers(xml: &str) -> Result<Vec<(String, String)>, ToolError> {
    let titles: Vec<&str> = TITLE_TAG
        .captures_iter(xml)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
        .collect();
    let summaries: Vec<&str> = SUMMARY_TAG
        .captures_iter(xml)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
        .collect();

    if titles.len() != summaries.len() {
        return Err(ToolError::MismatchedFeed {
            titles: titles.len(),
            summaries: summaries.len(),
        });
    }

    Ok(titles
        .into_iter()
        .zip(summaries)
        .map(|(title, summary)| (title.to_string(), summary.to_string()))
        .collect())
}

fn render_papers(papers: &[(String, String)]) -> String {
    papers
        .iter()
        .map(|(title, summary)| format!("Title: {title}\nSummary: {summary}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Tool for ArxivSearchTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: NAME.to_string(),
            description: "Access all the papers on Arxiv to search for domain-specific \
                          scientific publications. Only use this tool when information from \
                          a scientific paper is needed."
                .to_string(),
        }
    }

    fn run(&self, query: &str) -> Result<ToolOutput, ToolError> {
        debug!(%query, "running arxiv search");

        let client = http_client()?;
        let xml = client
            .get(self.query_url(query))
            .send()?
            .error_for_status()?
            .text()?;

        let papers = extract_papers(&xml)?;
        debug!(count = papers.len(), "arxiv search returned papers");

        Ok(ToolOutput::Text(render_papers(&papers)))
    }
}
