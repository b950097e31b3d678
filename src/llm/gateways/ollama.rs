use crate::error::{OpsAgentError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage, LlmToolCall};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, info};

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Configuration for connecting to Ollama server
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub host: String,
    pub timeout: Option<std::time::Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            timeout: None,
        }
    }
}

/// Gateway for a local Ollama server
///
/// Useful for running the agents offline against a local model.
pub struct OllamaGateway {
    client: Client,
    config: OllamaConfig,
}

impl OllamaGateway {
    /// Create a new Ollama gateway with custom configuration
    pub fn with_config(config: OllamaConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(Self {
            client: client_builder.build()?,
            config,
        })
    }

    /// Create gateway with custom host
    pub fn with_host(host: impl Into<String>) -> Result<Self> {
        Self::with_config(OllamaConfig {
            host: host.into(),
            ..Default::default()
        })
    }

    async fn post_chat(&self, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/api/chat", self.config.host))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OpsAgentError::GatewayError(format!(
                "Ollama API error: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LlmGateway for OllamaGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to Ollama for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let mut body = json!({
            "model": model,
            "messages": adapt_messages_to_ollama(messages),
            "options": extract_ollama_options(config),
            "stream": false
        });

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            let tool_defs: Vec<_> = tools.iter().map(|t| t.descriptor()).collect();
            body["tools"] = serde_json::to_value(tool_defs)?;
        }

        let response_body = self.post_chat(&body).await?;

        let content = response_body["message"]["content"].as_str().map(String::from);

        // Ollama returns arguments as an object, not an encoded string
        let tool_calls = response_body["message"]["tool_calls"]
            .as_array()
            .map(|calls| {
                calls
                    .iter()
                    .filter_map(|call| {
                        let name = call["function"]["name"].as_str()?.to_string();
                        let arguments: HashMap<String, Value> = call["function"]["arguments"]
                            .as_object()?
                            .iter()
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .collect();

                        Some(LlmToolCall {
                            id: call["id"].as_str().map(String::from),
                            name,
                            arguments,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(LlmGatewayResponse {
            content,
            tool_calls,
        })
    }

    async fn complete_json(
        &self,
        model: &str,
        messages: &[LlmMessage],
        schema: Value,
        config: &CompletionConfig,
    ) -> Result<Value> {
        info!("Requesting structured output from Ollama");

        let body = json!({
            "model": model,
            "messages": adapt_messages_to_ollama(messages),
            "options": extract_ollama_options(config),
            "format": schema,
            "stream": false
        });

        let response_body = self.post_chat(&body).await?;
        let content = response_body["message"]["content"]
            .as_str()
            .ok_or_else(|| OpsAgentError::GatewayError("No content in response".to_string()))?;

        Ok(serde_json::from_str(content)?)
    }
}

// Message adapter for Ollama format
fn adapt_messages_to_ollama(messages: &[LlmMessage]) -> Vec<Value> {
    messages
        .iter()
        .map(|msg| {
            let mut ollama_msg = json!({
                "role": msg.role.as_str(),
                "content": msg.content.as_deref().unwrap_or("")
            });

            if let Some(tool_calls) = &msg.tool_calls {
                let calls: Vec<_> = tool_calls
                    .iter()
                    .map(|tc| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": tc.arguments
                            }
                        })
                    })
                    .collect();
                ollama_msg["tool_calls"] = json!(calls);
            }

            ollama_msg
        })
        .collect()
}

// Extract Ollama-specific options from config
fn extract_ollama_options(config: &CompletionConfig) -> Value {
    let mut options = json!({
        "temperature": config.temperature,
        "num_ctx": config.num_ctx,
    });

    if config.max_tokens > 0 {
        options["num_predict"] = json!(config.max_tokens);
    }

    if let Some(top_p) = config.top_p {
        options["top_p"] = json!(top_p);
    }

    if !config.stop.is_empty() {
        options["stop"] = json!(config.stop);
    }

    options
}
