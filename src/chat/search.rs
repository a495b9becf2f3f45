use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use super::completion::{ApiErrorBody, ToolDefinition};

/// Failures while fetching search results. Both render to the exact text
/// the model sees inside the `{"error": ...}` tool result.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to fetch search results. Status: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("An error occurred during search: {0}")]
    Transport(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<String>, SearchError>;
}

/// The one tool the completion provider may call: a single required string
/// parameter `query`.
pub(super) fn search_tool() -> ToolDefinition {
    ToolDefinition {
        name: "search".to_string(),
        description: "Get real-time information from the web for recent events or specific data."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query.",
                },
            },
            "required": ["query"],
        }),
    }
}

/// Payload handed back to the model for a tool call. Serializes to exactly
/// one of `{"results": [...]}` or `{"error": "..."}`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchOutcome {
    Results(Vec<String>),
    Error(String),
}

impl SearchOutcome {
    /// Folds a provider result into the payload: search failures become the
    /// error form, they never fail the turn.
    pub fn from_result(result: Result<Vec<String>, SearchError>) -> Self {
        match result {
            Ok(snippets) if snippets.is_empty() => Self::Error("No results found.".to_string()),
            Ok(snippets) => Self::Results(snippets),
            Err(why) => Self::Error(why.to_string()),
        }
    }

    pub fn encode(&self) -> String {
        // a string-only enum cannot fail to serialize
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to encode search results."}"#.to_string())
    }
}

/// Google Custom Search client.
pub struct GoogleSearch {
    client: reqwest::Client,
    api_key: String,
    cse_id: String,
}

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

impl GoogleSearch {
    pub fn new(client: reqwest::Client, api_key: String, cse_id: String) -> Self {
        Self {
            client,
            api_key,
            cse_id,
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<String>, SearchError> {
        let num = limit.to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|why| SearchError::Transport(why.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message)
                .unwrap_or_else(|| "Unknown error.".to_string());

            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|why| SearchError::Transport(why.to_string()))?;

        Ok(parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.snippet.unwrap_or_default())
            .collect())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Deserialize)]
struct SearchItem {
    snippet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippets_encode_under_the_results_key() {
        let outcome = SearchOutcome::from_result(Ok(vec!["first".into(), "second".into()]));

        assert_eq!(outcome.encode(), r#"{"results":["first","second"]}"#);
    }

    #[test]
    fn empty_results_become_the_error_form() {
        let outcome = SearchOutcome::from_result(Ok(vec![]));

        assert_eq!(outcome.encode(), r#"{"error":"No results found."}"#);
    }

    #[test]
    fn api_failures_carry_status_and_message() {
        let outcome = SearchOutcome::from_result(Err(SearchError::Api {
            status: 403,
            message: "Daily quota exceeded".to_string(),
        }));

        assert_eq!(
            outcome.encode(),
            r#"{"error":"Failed to fetch search results. Status: 403 - Daily quota exceeded"}"#
        );
    }

    #[test]
    fn transport_failures_use_the_generic_form() {
        let outcome =
            SearchOutcome::from_result(Err(SearchError::Transport("connection reset".into())));

        assert_eq!(
            outcome.encode(),
            r#"{"error":"An error occurred during search: connection reset"}"#
        );
    }

    #[test]
    fn encoded_outcome_has_exactly_one_key() {
        for outcome in [
            SearchOutcome::Results(vec!["snippet".into()]),
            SearchOutcome::Error("No results found.".into()),
        ] {
            let value: serde_json::Value = serde_json::from_str(&outcome.encode()).unwrap();
            let object = value.as_object().unwrap();

            assert_eq!(object.len(), 1);
            assert!(object.contains_key("results") ^ object.contains_key("error"));
        }
    }

    #[test]
    fn search_response_tolerates_missing_items_and_snippets() {
        let empty: SearchResponse =
            serde_json::from_str(r#"{"kind":"customsearch#search"}"#).unwrap();
        assert!(empty.items.is_none());

        let partial: SearchResponse = serde_json::from_str(
            r#"{"items":[{"title":"untitled"},{"snippet":"the answer"}]}"#,
        )
        .unwrap();
        let snippets: Vec<String> = partial
            .items
            .unwrap()
            .into_iter()
            .map(|item| item.snippet.unwrap_or_default())
            .collect();

        assert_eq!(snippets, vec![String::new(), "the answer".to_string()]);
    }

    #[test]
    fn the_search_tool_requires_a_query_string() {
        let tool = search_tool();

        assert_eq!(tool.name, "search");
        assert_eq!(tool.parameters["required"], json!(["query"]));
        assert_eq!(tool.parameters["properties"]["query"]["type"], "string");
    }
}
