//! Plan-and-execute agent.
//!
//! A planner turns the objective into ordered steps with one model call. Each
//! step then runs through an executor, ReAct or native tool calling, that
//! sees the objective and the responses to earlier steps. The plan is not
//! revised once made.

pub mod agent;
pub mod executor;
pub mod models;
pub mod planner;
pub mod tasks;

pub use agent::{PlanAndExecuteAgent, PlanAndExecuteAgentBuilder};
pub use executor::{ReActStepExecutor, StepExecutor, ToolCallingStepExecutor};
pub use models::{Plan, PlanExecuteRun, StepResult};
pub use planner::{Planner, StructuredPlanner, TextPlanner};
pub use tasks::{Task, TaskList, TaskStatus};
