//! ReAct agent answering a factual question with web search
//!
//! # Usage
//!
//! ```bash
//! SERPAPI_API_KEY=... OPENAI_API_KEY=... cargo run --example react_search
//! ```

use anyhow::Context;
use opsagent::agents::ReActAgent;
use opsagent::config::Settings;
use opsagent::ops::SerpApiSearchTool;
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
    let api_key = settings
        .serpapi_api_key
        .clone()
        .context("SERPAPI_API_KEY must be set for the search demo")?;

    let agent = ReActAgent::builder(Arc::new(settings.broker()?))
        .tool(SerpApiSearchTool::new(api_key)?)
        .max_iterations(6)
        .config(settings.completion_config())
        .build();

    let question = "Who won the 2022 FIFA World Cup, and who scored in the final for the winners?";
    println!("Question: {}\n", question);

    let run = agent.run(question).await?;

    for step in &run.steps {
        println!("Action: {} [{}]", step.action.tool, step.action.tool_input);
        println!("Observation: {}\n", step.observation);
    }
    println!("Answer: {}", run.output);

    Ok(())
}
