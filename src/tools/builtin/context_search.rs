//! Context search tool implementation
//!
//! Formats documents returned by a host-supplied retriever. The retriever
//! itself (vector store, keyword index, whatever the host runs) stays
//! behind the [`DocumentRetriever`] trait.

use crate::tools::{Tool, ToolDescription, ToolError, ToolOutput};
use async_trait::async_trait;
use std::sync::Arc;

const NAME: &str = "context_search";

/// Host-side handle into an internal document index.
pub trait DocumentRetriever: Send + Sync {
    /// Documents relevant to the query, most relevant first.
    fn relevant_documents(&self, query: &str) -> Vec<RetrievedDocument>;
}

/// One document handed back by a retriever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedDocument {
    pub content: String,
    /// Where the document came from, when the index knows.
    pub source: Option<String>,
}

/// Internal documentation search over a host-supplied retriever.
pub struct ContextSearchTool {
    retriever: Arc<dyn DocumentRetriever>,
}

impl ContextSearchTool {
    pub fn new(retriever: Arc<dyn DocumentRetriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Tool for ContextSearchTool {
    fn describe(&self) -> ToolDescription {
        ToolDescription {
            name: NAME.to_string(),
            description: "Access internal technical documentation. Only use this tool for \
                          questions about the indexed internal projects."
                .to_string(),
        }
    }

    fn run(&self, query: &str) -> Result<ToolOutput, ToolError> {
        let mut result = String::new();
        for document in self.retriever.relevant_documents(query) {
            result.push_str("Document");
            result.push_str(&document.content);
            result.push_str("\nLink:");
            result.push_str(document.source.as_deref().unwrap_or(""));
            result.push('\n');
        }
        Ok(ToolOutput::Text(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRetriever(Vec<RetrievedDocument>);

    impl DocumentRetriever for FixedRetriever {
        fn relevant_documents(&self, _query: &str) -> Vec<RetrievedDocument> {
            self.0.clone()
        }
    }

    #[test]
    fn test_formats_documents_with_sources() {
        let retriever = Arc::new(FixedRetriever(vec![
            RetrievedDocument {
                content: "first doc".to_string(),
                source: Some("docs/a.md".to_string()),
            },
            RetrievedDocument {
                content: "second doc".to_string(),
                source: None,
            },
        ]));
        let tool = ContextSearchTool::new(retriever);

        let output = tool.run("anything").unwrap();
        assert_eq!(
            output.as_text(),
            Some("Documentfirst doc\nLink:docs/a.md\nDocumentsecond doc\nLink:\n")
        );
    }

    #[test]
    fn test_no_documents_yields_empty_string() {
        let tool = ContextSearchTool::new(Arc::new(FixedRetriever(Vec::new())));
        assert_eq!(tool.run("q").unwrap().as_text(), Some(""));
    }
}
