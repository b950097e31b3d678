use crate::error::Result;
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use serde_json::Value;

/// Generation parameters sent with every completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub temperature: f32,
    /// Nucleus sampling; omitted from the request when `None`
    pub top_p: Option<f32>,
    pub max_tokens: usize,
    pub num_ctx: usize,
    /// Sequences at which the model stops generating
    pub stop: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: None,
            max_tokens: 16384,
            num_ctx: 32768,
            stop: Vec::new(),
        }
    }
}

impl CompletionConfig {
    /// Copy of this config that also stops at `sequence`
    pub fn with_stop(&self, sequence: impl Into<String>) -> Self {
        let mut config = self.clone();
        let sequence = sequence.into();
        if !config.stop.contains(&sequence) {
            config.stop.push(sequence);
        }
        config
    }
}

/// Abstract interface for LLM providers
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Complete an LLM request with text response
    async fn complete(
        &self,
        model: &str,
        messages: &[LlmMessage],
        tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse>;

    /// Complete an LLM request with structured JSON response
    async fn complete_json(
        &self,
        model: &str,
        messages: &[LlmMessage],
        schema: Value,
        config: &CompletionConfig,
    ) -> Result<Value>;
}
