//! ReAct agent patching production EC2 instances and recording the change
//!
//! The EC2 and CMDB tools are mocks over a fixed inventory.
//!
//! # Usage
//!
//! ```bash
//! LLM_PROVIDER=ollama cargo run --example ec2_operations
//! ```

use opsagent::agents::ReActAgent;
use opsagent::config::Settings;
use opsagent::llm::tools::LlmTool;
use opsagent::ops::{ec2, CmdbWriter};
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
    let cmdb = CmdbWriter::new();

    let mut tools: Vec<Box<dyn LlmTool>> =
        ec2::tools().into_iter().map(|t| Box::new(t) as Box<dyn LlmTool>).collect();
    tools.push(Box::new(cmdb.tool()));

    let agent = ReActAgent::builder(Arc::new(settings.broker()?))
        .tools(tools)
        .max_iterations(12)
        .config(settings.completion_config())
        .build();

    let task = "Find all running production Windows instances, patch each of them, \
                and write a summary of what was patched to the CMDB.";
    println!("Task: {}\n", task);

    let run = agent.run(task).await?;

    for step in &run.steps {
        println!("Action: {} [{}]", step.action.tool, step.action.tool_input);
        println!("Observation: {}\n", step.observation);
    }
    println!("Answer: {}\n", run.output);

    println!("CMDB records:");
    for record in cmdb.records() {
        println!("  {} {} {}", record.recorded_at.to_rfc3339(), record.change_id, record.summary);
    }

    Ok(())
}
