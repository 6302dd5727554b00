//! Web search tool implementation
//!
//! Sends a query to a Serper-style search API and formats the answer from
//! whichever response section is present: an answer box, a knowledge-graph
//! entry, or the ranked organic results.

use crate::config::AgentConfig;
use crate::tools::builtin::http_client;
use crate::tools::{Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

const NAME: &str = "web_search";
const MAX_RESULTS: usize = 10;
const NO_RESULTS: &str = "No good search result was found.";

/// Web search tool backed by the Serper API.
pub struct WebSearchTool {
    api_key: Option<String>,
    site: Option<String>,
    base_url: String,
}

impl WebSearchTool {
    /// Create the tool from configuration, resolving the API key once.
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            api_key: config.search_api_key(),
            site: config.search.site.clone(),
            base_url: config.search.base_url.clone(),
        }
    }

    /// Append the configured site restriction to the query.
    fn scoped_query(&self, query: &str) -> String {
        match &self.site {
            Some(site) => format!("{query} site:{site}"),
            None => query.to_string(),
        }
    }
}

/// Search API response, with absent sections made explicit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    answer_box: Option<AnswerBox>,
    knowledge_graph: Option<KnowledgeGraph>,
    organic: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
    snippet_highlighted: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeGraph {
    title: Option<String>,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    description: Option<String>,
    description_link: Option<String>,
    attributes: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    attributes: Option<BTreeMap<String, String>>,
}

/// Format a response, trying the answer box first, then the knowledge
/// graph and organic results.
fn render_response(response: &SearchResponse) -> Result<String, ToolError> {
    if let Some(answer_box) = &response.answer_box {
        return render_answer_box(answer_box, response.organic.as_deref());
    }

    let organic = response.organic.as_deref().ok_or_else(|| {
        ToolError::MalformedResponse("search response has no organic results field".to_string())
    })?;

    let facts = collect_facts(response.knowledge_graph.as_ref(), organic);
    if organic.is_empty() && facts.is_empty() {
        return Ok(NO_RESULTS.to_string());
    }

    let mut lines = Vec::new();
    if let Some(kg) = &response.knowledge_graph {
        if let (Some(description), Some(link)) = (&kg.description, &kg.description_link) {
            let title = kg.title.as_deref().ok_or_else(|| {
                ToolError::MalformedResponse(
                    "knowledge graph entry has a description but no title".to_string(),
                )
            })?;
            lines.push(format!("Description: {title}{description}\nLink:{link}"));
        }
    }

    for result in organic.iter().take(MAX_RESULTS) {
        lines.push(render_organic(result)?);
    }

    Ok(lines.join("\n"))
}

/// `"Answer: <answer>\nLink:<link>"` where the answer is the first of the
/// explicit answer, the snippet (newlines flattened), or the highlighted
/// snippet fragments, and the link comes from the top organic result.
fn render_answer_box(
    answer_box: &AnswerBox,
    organic: Option<&[OrganicResult]>,
) -> Result<String, ToolError> {
    let answer = if let Some(answer) = &answer_box.answer {
        answer.clone()
    } else if let Some(snippet) = &answer_box.snippet {
        snippet.replace('\n', " ")
    } else if let Some(highlighted) = &answer_box.snippet_highlighted {
        highlighted.join(" ")
    } else {
        return Err(ToolError::MalformedResponse(
            "answer box carries no answer, snippet, or highlighted snippet".to_string(),
        ));
    };

    let first = organic.and_then(|results| results.first()).ok_or_else(|| {
        ToolError::MalformedResponse(
            "answer box present but organic results are missing".to_string(),
        )
    })?;
    let link = first.link.as_deref().ok_or_else(|| {
        ToolError::MalformedResponse("first organic result has no link".to_string())
    })?;

    Ok(format!("Answer: {answer}\nLink:{link}"))
}

fn render_organic(result: &OrganicResult) -> Result<String, ToolError> {
    let title = result.title.as_deref().ok_or_else(|| {
        ToolError::MalformedResponse("organic result has no title".to_string())
    })?;
    let snippet = result.snippet.as_deref().ok_or_else(|| {
        ToolError::MalformedResponse("organic result has no snippet".to_string())
    })?;
    let link = result.link.as_deref().ok_or_else(|| {
        ToolError::MalformedResponse("organic result has no link".to_string())
    })?;
    Ok(format!("Description: {title}{snippet}\nLink:{link}"))
}

/// Gather every fact the response carries, knowledge-graph entries and
/// organic snippets alike. Only used to decide whether the response is
/// empty enough to report "no results".
fn collect_facts(kg: Option<&KnowledgeGraph>, organic: &[OrganicResult]) -> Vec<String> {
    let mut facts = Vec::new();

    if let Some(kg) = kg {
        if let (Some(title), Some(entity_type)) = (&kg.title, &kg.entity_type) {
            facts.push(format!("{title}: {entity_type}."));
        }
        if let Some(description) = &kg.description {
            facts.push(description.clone());
        }
        if let (Some(title), Some(attributes)) = (&kg.title, &kg.attributes) {
            for (attribute, value) in attributes {
                facts.push(format!("{title} {attribute}: {value}."));
            }
        }
    }

    for result in organic.iter().take(MAX_RESULTS) {
        if let Some(snippet) = &result.snippet {
            facts.push(snippet.clone());
        }
        if let Some(attributes) = &result.attributes {
            for (attribute, value) in attributes {
                facts.push(format!("{attribute}: {value}."));
            }
        }
    }

    facts
}

#[async_trait]
impl Tool for WebSearchTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: NAME.to_string(),
            description: "Access the internet to search for information. Only use this tool \
                          when the information cannot be found with internal search."
                .to_string(),
        }
    }

    fn run(&self, query: &str) -> Result<ToolOutput, ToolError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ToolError::NotConfigured {
            tool: NAME.to_string(),
            reason: "search API key is not set".to_string(),
        })?;

        let query = self.scoped_query(query);
        debug!(%query, "running web search");

        let client = http_client()?;
        let response = client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", api_key)
            .json(&json!({
                "q": query,
                "num": MAX_RESULTS,
                "gl": "us",
                "hl": "en"
            }))
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            ToolError::MalformedResponse(format!("search response is not valid JSON: {e}"))
        })?;

        Ok(ToolOutput::Text(render_response(&parsed)?))
    }
}
