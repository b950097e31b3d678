//! Operations agents: ReAct and plan-and-execute agents driving mock
//! infrastructure tools through OpenAI or Ollama.

pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod ops;

#[cfg(test)]
mod test_support;

pub use error::{OpsAgentError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agents::{PlanAndExecuteAgent, ReActAgent};
    pub use crate::config::{Provider, Settings};
    pub use crate::error::{OpsAgentError, Result};
    pub use crate::llm::tools::{FunctionTool, LlmTool, ToolDescriptor};
    pub use crate::llm::{CompletionConfig, LlmBroker, LlmGateway, LlmMessage, MessageRole};
}
