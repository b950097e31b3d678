use super::models::StepResult;
use crate::agents::react::ReActAgent;
use crate::error::Result;
use crate::llm::tools::LlmTool;
use crate::llm::{CompletionConfig, LlmBroker, LlmMessage};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub const TOOL_CALLING_PROMPT: &str = "You are carrying out one step of a larger plan. Use the \
available tools whenever they can answer part of the step, then reply with the result of the \
step in a few sentences.";

/// Carries out one planned step and answers with the step's result.
///
/// Executors see the overall objective and what earlier steps returned, so
/// later steps can build on earlier answers without the plan being revised.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(&self, objective: &str, previous: &[StepResult], step: &str)
        -> Result<String>;
}

/// Runs each step through a ReAct agent's text protocol
pub struct ReActStepExecutor {
    agent: ReActAgent,
}

impl ReActStepExecutor {
    pub fn new(agent: ReActAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl StepExecutor for ReActStepExecutor {
    async fn execute(
        &self,
        objective: &str,
        previous: &[StepResult],
        step: &str,
    ) -> Result<String> {
        let run = self.agent.run(&step_input(objective, previous, step)).await?;
        if !run.finished {
            warn!(step, "Step stopped before a final answer");
        }
        Ok(run.output)
    }
}

/// Runs each step with the model's native tool calling
pub struct ToolCallingStepExecutor {
    broker: Arc<LlmBroker>,
    tools: Vec<Box<dyn LlmTool>>,
    config: CompletionConfig,
}

impl ToolCallingStepExecutor {
    pub fn new(broker: Arc<LlmBroker>, tools: Vec<Box<dyn LlmTool>>) -> Self {
        Self {
            broker,
            tools,
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl StepExecutor for ToolCallingStepExecutor {
    async fn execute(
        &self,
        objective: &str,
        previous: &[StepResult],
        step: &str,
    ) -> Result<String> {
        let messages = [
            LlmMessage::system(TOOL_CALLING_PROMPT),
            LlmMessage::user(step_input(objective, previous, step)),
        ];
        self.broker.generate(&messages, Some(&self.tools), Some(self.config.clone())).await
    }
}

/// Input handed to the executor for a single step
pub fn step_input(objective: &str, previous: &[StepResult], step: &str) -> String {
    let mut input = format!("Objective: {}\n\n", objective);

    if !previous.is_empty() {
        input.push_str("Previous steps:\n");
        for done in previous {
            input.push_str(&format!("Step: {}\nResponse: {}\n", done.step, done.response));
        }
        input.push('\n');
    }

    input.push_str(&format!("Current objective: {}", step));
    input
}
