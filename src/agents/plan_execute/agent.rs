use super::executor::{ReActStepExecutor, StepExecutor, ToolCallingStepExecutor};
use super::models::{PlanExecuteRun, StepResult};
use super::planner::{Planner, StructuredPlanner, TextPlanner};
use super::tasks::TaskList;
use crate::agents::react::ReActAgent;
use crate::error::Result;
use crate::llm::tools::LlmTool;
use crate::llm::{CompletionConfig, LlmBroker};
use std::sync::Arc;
use tracing::info;

/// Plans once, then works through the plan step by step.
///
/// The plan is never revised: a step that the executor could not finish is
/// recorded with whatever the executor answered and the next step runs.
/// Steps run through a ReAct agent by default, or through the model's native
/// tool calling when built with `native_tools(true)`.
///
/// # Examples
///
/// ```ignore
/// use opsagent::agents::PlanAndExecuteAgent;
/// use opsagent::ops::customers;
///
/// let agent = PlanAndExecuteAgent::builder(broker)
///     .tool(customers::tool())
///     .build();
///
/// let run = agent.run("Which city does customer 8 live in?").await?;
/// println!("{}", run.output);
/// ```
pub struct PlanAndExecuteAgent {
    planner: Box<dyn Planner>,
    executor: Box<dyn StepExecutor>,
}

impl PlanAndExecuteAgent {
    pub fn new(planner: Box<dyn Planner>, executor: Box<dyn StepExecutor>) -> Self {
        Self { planner, executor }
    }

    pub fn builder(broker: Arc<LlmBroker>) -> PlanAndExecuteAgentBuilder {
        PlanAndExecuteAgentBuilder::new(broker)
    }

    pub async fn run(&self, objective: &str) -> Result<PlanExecuteRun> {
        let plan = self.planner.plan(objective).await?;
        info!(steps = plan.steps.len(), "Executing plan");

        let mut tasks = TaskList::from_steps(plan.steps.iter().cloned());
        let mut results: Vec<StepResult> = Vec::new();

        while let Some(task) = tasks.next_pending().cloned() {
            tasks.start_task(task.id)?;
            info!(task_id = task.id, step = %task.description, "Starting step");

            let response = self.executor.execute(objective, &results, &task.description).await?;

            let task = tasks.complete_task(task.id)?;
            info!(
                task_id = task.id,
                status = task.status.as_str(),
                response = %response,
                "Step completed"
            );

            results.push(StepResult {
                step: task.description,
                response,
            });
        }

        let output = results.last().map(|r| r.response.clone()).unwrap_or_default();

        Ok(PlanExecuteRun {
            plan,
            steps: results,
            tasks: tasks.list_tasks().to_vec(),
            output,
        })
    }
}

/// Builder for a `PlanAndExecuteAgent` sharing one broker between planner
/// and executor.
pub struct PlanAndExecuteAgentBuilder {
    broker: Arc<LlmBroker>,
    tools: Vec<Box<dyn LlmTool>>,
    planner: Option<Box<dyn Planner>>,
    structured: bool,
    native_tools: bool,
    max_iterations: usize,
    config: CompletionConfig,
}

impl PlanAndExecuteAgentBuilder {
    fn new(broker: Arc<LlmBroker>) -> Self {
        Self {
            broker,
            tools: Vec::new(),
            planner: None,
            structured: false,
            native_tools: false,
            max_iterations: 15,
            config: CompletionConfig::default(),
        }
    }

    /// Add a tool for the executor
    pub fn tool(mut self, tool: impl LlmTool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn tools(mut self, tools: Vec<Box<dyn LlmTool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Use a custom planner instead of the built-in ones
    pub fn planner(mut self, planner: Box<dyn Planner>) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Ask for the plan as a JSON object rather than a numbered list
    pub fn structured_plan(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }

    /// Execute steps with the model's native tool calling instead of ReAct
    pub fn native_tools(mut self, native_tools: bool) -> Self {
        self.native_tools = native_tools;
        self
    }

    /// Iteration limit for each step's ReAct run (default: 15)
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> PlanAndExecuteAgent {
        let planner: Box<dyn Planner> = match self.planner {
            Some(planner) => planner,
            None if self.structured => Box::new(
                StructuredPlanner::new(self.broker.clone()).with_config(self.config.clone()),
            ),
            None => {
                Box::new(TextPlanner::new(self.broker.clone()).with_config(self.config.clone()))
            }
        };

        let executor: Box<dyn StepExecutor> = if self.native_tools {
            Box::new(
                ToolCallingStepExecutor::new(self.broker, self.tools).with_config(self.config),
            )
        } else {
            Box::new(ReActStepExecutor::new(
                ReActAgent::builder(self.broker)
                    .tools(self.tools)
                    .max_iterations(self.max_iterations)
                    .config(self.config)
                    .build(),
            ))
        };

        PlanAndExecuteAgent::new(planner, executor)
    }
}
