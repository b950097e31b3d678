use crate::error::{OpsAgentError, Result};
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::LlmMessage;
use crate::llm::tools::LlmTool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main interface for LLM interactions
///
/// Binds a model identifier to a gateway so agents only deal in messages.
pub struct LlmBroker {
    model: String,
    gateway: Arc<dyn LlmGateway>,
}

impl LlmBroker {
    /// Upper bound on consecutive native tool-call rounds in one `generate`
    const MAX_TOOL_ROUNDS: usize = 8;

    /// Create a new LLM broker
    pub fn new(model: impl Into<String>, gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            model: model.into(),
            gateway,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text response from LLM
    ///
    /// When tools are supplied and the model answers with native tool calls,
    /// the tools are run, their output is appended to the conversation and the
    /// model is asked again. A failing tool answers its call with the error
    /// text instead of ending the request.
    pub async fn generate(
        &self,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: Option<CompletionConfig>,
    ) -> Result<String> {
        let config = config.unwrap_or_default();
        let mut current_messages = messages.to_vec();

        for _ in 0..=Self::MAX_TOOL_ROUNDS {
            debug!(model = %self.model, messages = current_messages.len(), "Calling gateway");
            let response =
                self.gateway.complete(&self.model, &current_messages, tools, &config).await?;

            let tools = match tools {
                Some(tools) if !response.tool_calls.is_empty() => tools,
                _ => return Ok(response.content.unwrap_or_default()),
            };

            info!("Tool calls requested: {}", response.tool_calls.len());
            current_messages.push(LlmMessage::tool_request(response.tool_calls.clone()));

            for tool_call in &response.tool_calls {
                let output = match tools.iter().find(|t| t.matches(&tool_call.name)) {
                    Some(tool) => {
                        info!(tool = %tool_call.name, "Executing tool");
                        match tool.run(&tool_call.arguments).await {
                            Ok(Value::String(text)) => text,
                            Ok(other) => other.to_string(),
                            Err(e) => {
                                warn!(tool = %tool_call.name, error = %e, "Tool failed");
                                format!("Error: {}", e)
                            }
                        }
                    }
                    None => {
                        warn!("Tool not found: {}", tool_call.name);
                        format!("Tool '{}' is not available", tool_call.name)
                    }
                };
                current_messages.push(LlmMessage::tool_result(tool_call, output));
            }
        }

        Err(OpsAgentError::AgentError(format!(
            "model kept requesting tools after {} rounds",
            Self::MAX_TOOL_ROUNDS
        )))
    }

    /// Generate structured object response from LLM
    pub async fn generate_object<T>(
        &self,
        messages: &[LlmMessage],
        config: Option<CompletionConfig>,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de> + Serialize + schemars::JsonSchema + Send,
    {
        let config = config.unwrap_or_default();

        let schema = serde_json::to_value(schemars::schema_for!(T))?;

        let json_response =
            self.gateway.complete_json(&self.model, messages, schema, &config).await?;

        Ok(serde_json::from_value(json_response)?)
    }
}
