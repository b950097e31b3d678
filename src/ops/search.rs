use crate::error::{OpsAgentError, Result};
use crate::llm::tools::{LlmTool, ToolDescriptor};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, info};

const SERPAPI_BASE_URL: &str = "https://serpapi.com";
const TIMEOUT_SECONDS: u64 = 20;
pub const NO_RESULT: &str = "No good search result found";

/// Tool for answering current-events questions through SerpAPI
///
/// The tool reduces the search response to one short answer, preferring
/// direct answers over organic results.
///
/// # Examples
///
/// ```ignore
/// use opsagent::ops::search::SerpApiSearchTool;
///
/// let tool = SerpApiSearchTool::new(std::env::var("SERPAPI_API_KEY")?)?;
/// ```
pub struct SerpApiSearchTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiSearchTool {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, SERPAPI_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OpsAgentError::ConfigError("SERPAPI_API_KEY is not set".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    pub async fn search(&self, query: &str) -> Result<String> {
        info!(query, "Searching the web");

        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[("engine", "google"), ("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OpsAgentError::ApiError(format!(
                "Search request failed with status {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        if let Some(error) = body["error"].as_str() {
            return Err(OpsAgentError::ApiError(format!("Search API error: {}", error)));
        }

        let answer = extract_answer(&body);
        debug!(answer = %answer, "Search answer");
        Ok(answer)
    }
}

/// Reduce a search response to its most direct answer
fn extract_answer(body: &Value) -> String {
    let answer_box = &body["answer_box"];
    let candidates = [
        &answer_box["answer"],
        &answer_box["snippet"],
        &answer_box["snippet_highlighted_words"][0],
        &body["sports_results"]["game_spotlight"],
        &body["knowledge_graph"]["description"],
        &body["organic_results"][0]["snippet"],
    ];

    candidates
        .iter()
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Object(_) => Some(v.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| NO_RESULT.to_string())
}

#[async_trait]
impl LlmTool for SerpApiSearchTool {
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let query = args
            .get("input")
            .or_else(|| args.get("query"))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| OpsAgentError::InvalidArgument("search query is required".to_string()))?;

        Ok(json!(self.search(query).await?))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            "search",
            "A search engine. Useful for when you need to answer questions about current \
             events or facts you do not know. Input should be a search query.",
            json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["input"]
            }),
        )
    }
}
