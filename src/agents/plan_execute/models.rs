use super::tasks::Task;
use serde::{Deserialize, Serialize};

/// Ordered steps produced by a planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema, Default)]
pub struct Plan {
    /// How to complete the objective, one action per step, in order.
    #[serde(default)]
    pub steps: Vec<String>,
}

/// A planned step with the executor's response to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step: String,
    pub response: String,
}

/// Everything a plan-and-execute run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExecuteRun {
    pub plan: Plan,
    pub steps: Vec<StepResult>,
    /// Final state of every step.
    pub tasks: Vec<Task>,
    /// Response to the last step.
    pub output: String,
}
