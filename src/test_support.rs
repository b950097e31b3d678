//! Scripted gateway shared by unit tests.

use crate::error::Result;
use crate::llm::gateway::{CompletionConfig, LlmGateway};
use crate::llm::models::{LlmGatewayResponse, LlmMessage};
use crate::llm::tools::LlmTool;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every request it sees.
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<LlmGatewayResponse>>,
    json_responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<Vec<LlmMessage>>>,
    configs: Mutex<Vec<CompletionConfig>>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<LlmGatewayResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            json_responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| LlmGatewayResponse {
                    content: Some(t.to_string()),
                    tool_calls: vec![],
                })
                .collect(),
        )
    }

    pub(crate) fn with_json(self, values: Vec<Value>) -> Self {
        *self.json_responses.lock().unwrap() = values.into();
        self
    }

    pub(crate) fn requests(&self) -> Vec<Vec<LlmMessage>> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn configs(&self) -> Vec<CompletionConfig> {
        self.configs.lock().unwrap().clone()
    }

    /// Text of the last message of every `complete` request
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|messages| messages.last().and_then(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(
        &self,
        _model: &str,
        messages: &[LlmMessage],
        _tools: Option<&[Box<dyn LlmTool>]>,
        config: &CompletionConfig,
    ) -> Result<LlmGatewayResponse> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.configs.lock().unwrap().push(config.clone());
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn complete_json(
        &self,
        _model: &str,
        messages: &[LlmMessage],
        _schema: Value,
        config: &CompletionConfig,
    ) -> Result<Value> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.configs.lock().unwrap().push(config.clone());
        Ok(self.json_responses.lock().unwrap().pop_front().unwrap_or(Value::Null))
    }
}
