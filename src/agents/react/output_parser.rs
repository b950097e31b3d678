//! Parser for ReAct-formatted model output.

use super::models::{AgentAction, AgentFinish, ReActOutput};
use crate::error::{OpsAgentError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const FINAL_ANSWER_ACTION: &str = "Final Answer:";

pub const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
pub const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub const ACTION_AND_ANSWER: &str =
    "Parsing LLM output produced both a final answer and a parse-able action";

fn action_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
            .expect("action pattern is valid")
    })
}

fn action_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)")
            .expect("action line pattern is valid")
    })
}

/// Parse one model turn into an action or a final answer.
///
/// Errors are [`OpsAgentError::ParseError`] carrying a message written for the
/// model, so the caller can feed it back as an observation.
pub fn parse(text: &str) -> Result<ReActOutput> {
    let includes_answer = text.contains(FINAL_ANSWER_ACTION);

    if let Some(captures) = action_regex().captures(text) {
        if includes_answer {
            return Err(OpsAgentError::ParseError(format!("{}: {}", ACTION_AND_ANSWER, text)));
        }

        let tool = captures[1].trim().to_string();
        let mut tool_input = captures[2].trim();

        // Models that ignore the stop sequence hallucinate their own observation
        if let Some(pos) = tool_input.find("\nObservation") {
            tool_input = tool_input[..pos].trim();
        }
        let tool_input = tool_input.trim_matches(' ').trim_matches('"').to_string();

        return Ok(ReActOutput::Action(AgentAction {
            tool,
            tool_input,
            log: text.to_string(),
        }));
    }

    if includes_answer {
        let output = text.rsplit(FINAL_ANSWER_ACTION).next().unwrap_or_default().trim();
        return Ok(ReActOutput::Finish(AgentFinish {
            output: output.to_string(),
            log: text.to_string(),
        }));
    }

    if !action_line_regex().is_match(text) {
        Err(OpsAgentError::ParseError(MISSING_ACTION.to_string()))
    } else {
        Err(OpsAgentError::ParseError(MISSING_ACTION_INPUT.to_string()))
    }
}
