//! Agents that drive tools with a language model.
//!
//! - [`ReActAgent`] - thought/action/observation loop over a text protocol
//! - [`PlanAndExecuteAgent`] - plans once, then runs each step through a ReAct executor

pub mod plan_execute;
pub mod react;

pub use plan_execute::{PlanAndExecuteAgent, Planner, StructuredPlanner, TextPlanner};
pub use react::ReActAgent;
