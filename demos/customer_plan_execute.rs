//! Plan-and-execute agent answering a question about a customer
//!
//! Set `STRUCTURED_PLAN=1` to request the plan as JSON instead of a numbered
//! list, and `NATIVE_TOOLS=1` to run the steps with the model's native tool
//! calling instead of the ReAct text protocol.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example customer_plan_execute
//! ```

use opsagent::agents::PlanAndExecuteAgent;
use opsagent::config::Settings;
use opsagent::ops::customers;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("opsagent=info")),
        )
        .init();

    let settings = Settings::load()?;
    let structured = std::env::var("STRUCTURED_PLAN").is_ok_and(|v| v == "1");
    let native_tools = std::env::var("NATIVE_TOOLS").is_ok_and(|v| v == "1");

    let agent = PlanAndExecuteAgent::builder(Arc::new(settings.broker()?))
        .tool(customers::tool())
        .structured_plan(structured)
        .native_tools(native_tools)
        .max_iterations(6)
        .config(settings.completion_config())
        .build();

    let objective = "What is the name and zip code of customer 8, and which orders have they placed?";
    println!("Objective: {}\n", objective);

    let run = agent.run(objective).await?;

    println!("Plan:");
    for (i, step) in run.plan.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();

    for result in &run.steps {
        println!("Step: {}\nResponse: {}\n", result.step, result.response);
    }
    println!("Tasks:");
    for task in &run.tasks {
        println!("  {} [{}] {}", task.id, task.status.as_str(), task.description);
    }
    println!("\nAnswer: {}", run.output);

    Ok(())
}
