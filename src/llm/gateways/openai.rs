//! OpenAI Gateway for LLM interactions.
//!
//! Talks to the hosted chat-completions API, or to any host exposing the same
//! surface when `base_url` is pointed elsewhere.

use crate::error::{OpsAgentError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::gateways::openai_messages_adapter::{adapt_messages_to_openai, convert_tool_calls};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for connecting to OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Option<std::time::Duration>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Gateway for OpenAI LLM service.
pub struct OpenAIGateway {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIGateway {
    /// Create a new OpenAI gateway with custom configuration.
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(OpsAgentError::ConfigError("OpenAI API key is not set".to_string()));
        }

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(Self {
            client: client_builder.build()?,
            config,
        })
    }

    /// Create gateway with custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    /// Create gateway with custom API key and base URL.
    pub fn with_api_key_and_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(OpenAIConfig {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Request body shared by text and JSON completions.
    fn build_body(
        &self,
        model: &str,
        messages: &[LlmMessage],
        config: &CompletionConfig,
    ) -> Result<Value> {
        let mut body = json!({
            "model": model,
            "messages": adapt_messages_to_openai(messages)?,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        if let Some(top_p) = config.top_p {
            body["top_p"] = json!(top_p);
        }

        if !config.stop.is_empty() {
            body["stop"] = json!(config.stop);
        }

        Ok(body)
    }

    async fn post_chat(&self, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(OpsAgentError::GatewayError(format!(
                "OpenAI API error: {} - {}",
                status, error_text
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LlmGateway for OpenAIGateway {
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        info!("Delegating to OpenAI for completion");
        debug!("Model: {}, Message count: {}", model, messages.len());

        let mut body = self.build_body(model, messages, config)?;

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            let tool_defs: Vec<_> = tools.iter().map(|t| t.descriptor()).collect();
            body["tools"] = serde_json::to_value(tool_defs)?;
        }

        let response_body = self.post_chat(&body).await?;
        let message = &response_body["choices"][0]["message"];

        let content = message["content"].as_str().map(String::from);
        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| convert_tool_calls(calls))
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
        info!("Requesting structured output from OpenAI");

        let mut body = self.build_body(model, messages, config)?;
        body["response_format"] = json!({
            "type": "json_schema",
            "json_schema": {
                "name": "response",
                "schema": schema
            }
        });

        let response_body = self.post_chat(&body).await?;
        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| OpsAgentError::GatewayError("No content in response".to_string()))?;

        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tools::FunctionTool;

    #[test]
    fn test_openai_config_default() {
        let config = OpenAIConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_gateway_requires_api_key() {
        let result = OpenAIGateway::with_api_key("");
        assert!(matches!(result, Err(OpsAgentError::ConfigError(_))));
    }

    #[test]
    fn test_gateway_with_api_key_and_base_url() {
        let gateway = OpenAIGateway::with_api_key_and_base_url("key", "https://custom.com").unwrap();
        assert_eq!(gateway.config.api_key, "key");
        assert_eq!(gateway.config.base_url, "https://custom.com");
    }

    #[test]
    fn test_build_body_includes_sampling_parameters() {
        let gateway = OpenAIGateway::with_api_key("key").unwrap();
        let config = CompletionConfig {
            temperature: 0.0,
            top_p: Some(0.9),
            max_tokens: 512,
            stop: vec!["\nObservation:".to_string()],
            ..Default::default()
        };

        let body = gateway.build_body("gpt-4o", &[LlmMessage::user("Hi")], &config).unwrap();

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["temperature"], 0.0);
        assert!((body["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
        assert_eq!(body["stop"][0], "\nObservation:");
    }

    #[test]
    fn test_build_body_omits_unset_parameters() {
        let gateway = OpenAIGateway::with_api_key("key").unwrap();

        let body = gateway
            .build_body("gpt-4o", &[LlmMessage::user("Hi")], &CompletionConfig::default())
            .unwrap();

        assert!(body.get("top_p").is_none());
        assert!(body.get("stop").is_none());
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap();
        let messages = vec![LlmMessage::user("Hi")];

        let response = gateway
            .complete("gpt-4", &messages, None, &CompletionConfig::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, Some("Hello!".to_string()));
        assert!(response.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_complete_sends_tools_and_parses_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::Regex(r#""name":"customer_lookup""#.to_string()))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null,"tool_calls":[{"id":"call_1","type":"function","function":{"name":"customer_lookup","arguments":"{\"input\": \"8\"}"}}]}}]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap();
        let tools: Vec<Box<dyn LlmTool>> = vec![Box::new(FunctionTool::new(
            "customer_lookup",
            "Look up a customer",
            |i| Ok(i.to_string()),
        ))];

        let response = gateway
            .complete("gpt-4", &[LlmMessage::user("Who?")], Some(&tools), &CompletionConfig::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, None);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "customer_lookup");
        assert_eq!(response.tool_calls[0].arguments["input"], "8");
    }

    #[tokio::test]
    async fn test_complete_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("bad-key", server.url()).unwrap();

        let err = gateway
            .complete("gpt-4", &[LlmMessage::user("Hi")], None, &CompletionConfig::default())
            .await
            .unwrap_err();

        mock.assert_async().await;
        match err {
            OpsAgentError::GatewayError(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Unauthorized"));
            }
            other => panic!("Expected GatewayError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"response_format":{"type":"json_schema"}}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"{\"steps\":[\"a\",\"b\"]}"}}]}"#)
            .create_async()
            .await;

        let gateway = OpenAIGateway::with_api_key_and_base_url("test-key", server.url()).unwrap();

        let value = gateway
            .complete_json(
                "gpt-4",
                &[LlmMessage::user("Plan")],
                json!({"type": "object"}),
                &CompletionConfig::default(),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value["steps"][1], "b");
    }
}
