//! Data models for the ReAct loop.

use serde::{Deserialize, Serialize};

/// A tool invocation the model asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    /// Name of the tool to run.
    pub tool: String,
    /// Text passed to the tool as its single input.
    pub tool_input: String,
    /// Raw model output that produced this action, replayed in the scratchpad.
    pub log: String,
}

/// The model's final answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFinish {
    pub output: String,
    pub log: String,
}

/// What one model turn parsed into.
#[derive(Debug, Clone, PartialEq)]
pub enum ReActOutput {
    Action(AgentAction),
    Finish(AgentFinish),
}

/// An action paired with what came back from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStep {
    pub action: AgentAction,
    pub observation: String,
}

/// Result of a complete agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub output: String,
    pub steps: Vec<AgentStep>,
    /// False when the run ended at the iteration limit rather than on a final answer.
    pub finished: bool,
}
