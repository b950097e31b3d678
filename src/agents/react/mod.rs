//! Reason-act (ReAct) agent.
//!
//! The model alternates between thinking, naming a tool with an input, and
//! reading the tool's observation, until it gives a final answer.
//!
//! # Components
//!
//! - **Agent**: the loop, tool dispatch and iteration limit
//! - **Output parser**: turns raw model text into an action or a final answer
//! - **Formatters**: the prompt and the scratchpad of previous steps
//! - **Models**: actions, steps and run results

pub mod agent;
pub mod formatters;
pub mod models;
pub mod output_parser;

pub use agent::{ReActAgent, ReActAgentBuilder};
pub use models::{AgentAction, AgentFinish, AgentRun, AgentStep, ReActOutput};
