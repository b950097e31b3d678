use super::formatters::{build_prompt, format_tool_names, DEFAULT_PREFIX};
use super::models::{AgentAction, AgentRun, AgentStep, ReActOutput};
use super::output_parser;
use crate::error::{OpsAgentError, Result};
use crate::llm::tools::LlmTool;
use crate::llm::{CompletionConfig, LlmBroker, LlmMessage};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const STOP_SEQUENCE: &str = "\nObservation:";
pub const ITERATION_LIMIT_OUTPUT: &str = "Agent stopped due to iteration limit or time limit.";

/// Tool name recorded for turns whose output could not be parsed
pub const INVALID_OUTPUT_TOOL: &str = "_Exception";

/// Reason-act agent that drives tools through a text protocol.
///
/// Every turn the model sees the question, the tool list and a scratchpad of
/// earlier actions and observations. It either names a tool with an input or
/// gives a final answer. Tool choice is left entirely to the model.
///
/// # Examples
///
/// ```ignore
/// use opsagent::agents::ReActAgent;
/// use opsagent::ops::customers;
///
/// let agent = ReActAgent::builder(broker)
///     .tool(customers::tool())
///     .max_iterations(5)
///     .build();
///
/// let run = agent.run("What is the zip code of customer 8?").await?;
/// println!("{}", run.output);
/// ```
pub struct ReActAgent {
    broker: Arc<LlmBroker>,
    tools: Vec<Box<dyn LlmTool>>,
    max_iterations: usize,
    prefix: String,
    config: CompletionConfig,
}

impl ReActAgent {
    pub fn builder(broker: Arc<LlmBroker>) -> ReActAgentBuilder {
        ReActAgentBuilder::new(broker)
    }

    pub fn tools(&self) -> &[Box<dyn LlmTool>] {
        &self.tools
    }

    /// Run the loop until the model answers or the iteration limit is hit.
    ///
    /// Gateway failures end the run with an error. Bad model output, unknown
    /// tools and tool failures are reported back to the model as observations.
    pub async fn run(&self, input: &str) -> Result<AgentRun> {
        let config = self.config.with_stop(STOP_SEQUENCE);
        let mut steps: Vec<AgentStep> = Vec::new();

        for iteration in 1..=self.max_iterations {
            let prompt = build_prompt(&self.prefix, &self.tools, input, &steps);
            let text =
                self.broker.generate(&[LlmMessage::user(prompt)], None, Some(config.clone())).await?;
            debug!(iteration, output = %text, "Model turn");

            match output_parser::parse(&text) {
                Ok(ReActOutput::Finish(finish)) => {
                    info!(iteration, "Agent finished");
                    return Ok(AgentRun {
                        output: finish.output,
                        steps,
                        finished: true,
                    });
                }
                Ok(ReActOutput::Action(action)) => {
                    let observation = self.invoke(&action).await;
                    steps.push(AgentStep {
                        action,
                        observation,
                    });
                }
                Err(OpsAgentError::ParseError(reason)) => {
                    warn!(iteration, reason = %reason, "Could not parse model output");
                    steps.push(AgentStep {
                        action: AgentAction {
                            tool: INVALID_OUTPUT_TOOL.to_string(),
                            tool_input: "Invalid or incomplete response".to_string(),
                            log: text,
                        },
                        observation: reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        warn!(max_iterations = self.max_iterations, "Iteration limit reached");
        Ok(AgentRun {
            output: ITERATION_LIMIT_OUTPUT.to_string(),
            steps,
            finished: false,
        })
    }

    /// Run the named tool and render whatever happens as an observation
    async fn invoke(&self, action: &AgentAction) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.matches(&action.tool)) else {
            warn!(tool = %action.tool, "Model asked for an unknown tool");
            return format!(
                "{} is not a valid tool, try one of [{}].",
                action.tool,
                format_tool_names(&self.tools)
            );
        };

        info!(tool = %action.tool, input = %action.tool_input, "Executing tool");
        let args = HashMap::from([("input".to_string(), json!(action.tool_input))]);

        match tool.run(&args).await {
            Ok(Value::String(text)) => text,
            Ok(other) => other.to_string(),
            Err(e) => {
                warn!(tool = %action.tool, error = %e, "Tool failed");
                format!("Error: {}", e)
            }
        }
    }
}

/// Builder for constructing a `ReActAgent` with custom configuration.
pub struct ReActAgentBuilder {
    broker: Arc<LlmBroker>,
    tools: Vec<Box<dyn LlmTool>>,
    max_iterations: usize,
    prefix: Option<String>,
    config: CompletionConfig,
}

impl ReActAgentBuilder {
    fn new(broker: Arc<LlmBroker>) -> Self {
        Self {
            broker,
            tools: Vec::new(),
            max_iterations: 15,
            prefix: None,
            config: CompletionConfig::default(),
        }
    }

    /// Add one tool
    pub fn tool(mut self, tool: impl LlmTool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Add several tools
    pub fn tools(mut self, tools: Vec<Box<dyn LlmTool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the maximum number of model turns (default: 15)
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replace the instruction line that precedes the tool list
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ReActAgent {
        ReActAgent {
            broker: self.broker,
            tools: self.tools,
            max_iterations: self.max_iterations,
            prefix: self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            config: self.config,
        }
    }
}
