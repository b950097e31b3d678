//! Prompt assembly for the ReAct loop.

use super::models::AgentStep;
use crate::llm::tools::LlmTool;

pub const DEFAULT_PREFIX: &str =
    "Answer the following questions as best you can. You have access to the following tools:";

pub const OBSERVATION_PREFIX: &str = "Observation: ";
pub const LLM_PREFIX: &str = "Thought:";

/// One `name: description` line per tool.
pub fn format_available_tools(tools: &[Box<dyn LlmTool>]) -> String {
    tools
        .iter()
        .map(|t| format!("{}: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_tool_names(tools: &[Box<dyn LlmTool>]) -> String {
    tools.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
}

fn format_instructions(tool_names: &str) -> String {
    format!(
        "Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question",
        tool_names
    )
}

/// Replay previous steps so the model continues where it left off.
pub fn format_scratchpad(steps: &[AgentStep]) -> String {
    steps
        .iter()
        .map(|step| {
            format!(
                "{}\n{}{}\n{} ",
                step.action.log, OBSERVATION_PREFIX, step.observation, LLM_PREFIX
            )
        })
        .collect()
}

pub fn build_prompt(
    prefix: &str,
    tools: &[Box<dyn LlmTool>],
    input: &str,
    steps: &[AgentStep],
) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\nBegin!\n\nQuestion: {}\n{}{}",
        prefix,
        format_available_tools(tools),
        format_instructions(&format_tool_names(tools)),
        input,
        LLM_PREFIX,
        format_scratchpad(steps)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::react::models::AgentAction;
    use crate::llm::tools::FunctionTool;

    fn tools() -> Vec<Box<dyn LlmTool>> {
        vec![
            Box::new(FunctionTool::new("search", "Searches the web.", |i| Ok(i.to_string()))),
            Box::new(FunctionTool::new("customer_lookup", "Finds customers.", |i| {
                Ok(i.to_string())
            })),
        ]
    }

    #[test]
    fn test_format_available_tools() {
        assert_eq!(
            format_available_tools(&tools()),
            "search: Searches the web.\ncustomer_lookup: Finds customers."
        );
    }

    #[test]
    fn test_prompt_without_steps_ends_at_thought() {
        let prompt = build_prompt(DEFAULT_PREFIX, &tools(), "Who is customer 8?", &[]);

        assert!(prompt.starts_with(DEFAULT_PREFIX));
        assert!(prompt.contains("should be one of [search, customer_lookup]"));
        assert!(prompt.ends_with("Question: Who is customer 8?\nThought:"));
    }

    #[test]
    fn test_scratchpad_replays_log_and_observation() {
        let steps = vec![AgentStep {
            action: AgentAction {
                tool: "customer_lookup".to_string(),
                tool_input: "8".to_string(),
                log: " Look it up.\nAction: customer_lookup\nAction Input: 8".to_string(),
            },
            observation: "{\"id\":8}".to_string(),
        }];

        let prompt = build_prompt(DEFAULT_PREFIX, &tools(), "Who is customer 8?", &steps);

        assert!(prompt.ends_with(
            "Thought: Look it up.\nAction: customer_lookup\nAction Input: 8\nObservation: {\"id\":8}\nThought: "
        ));
    }
}
