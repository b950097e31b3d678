//! Planners turn an objective into an ordered list of steps with one model call.

use super::models::Plan;
use crate::error::{OpsAgentError, Result};
use crate::llm::{CompletionConfig, LlmBroker, LlmMessage};
use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::info;

pub const END_OF_PLAN: &str = "<END_OF_PLAN>";

pub const TEXT_PLANNER_PROMPT: &str = "Let's first understand the problem and devise a plan to \
solve the problem. Please output the plan starting with the header 'Plan:' and then followed by \
a numbered list of steps. Please make the plan the minimum number of steps required to \
accurately complete the task. If the task is a question, the final step should almost always be \
'Given the above steps taken, please respond to the users original question'. At the end of your \
plan, say '<END_OF_PLAN>'";

pub const STRUCTURED_PLANNER_PROMPT: &str = "Devise a plan to accomplish the user's objective. \
Return the minimum number of steps required, in order, each one a single concrete action. If the \
objective is a question, the last step should be to answer the original question using the \
results of the earlier steps.";

#[async_trait]
pub trait Planner: Send + Sync {
    async fn plan(&self, objective: &str) -> Result<Plan>;
}

fn numbered_step_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+\s*[.)]\s+(.*)$").expect("step pattern is valid"))
}

/// Parse a `Plan:` header followed by a numbered list.
///
/// Unnumbered lines after a step continue that step; anything before the
/// first numbered line is ignored.
pub fn parse_plan(text: &str) -> Plan {
    let body = text.split(END_OF_PLAN).next().unwrap_or_default();
    let mut steps: Vec<String> = Vec::new();

    for line in body.lines() {
        if let Some(captures) = numbered_step_regex().captures(line) {
            steps.push(captures[1].trim().to_string());
        } else if let Some(last) = steps.last_mut() {
            let continuation = line.trim();
            if !continuation.is_empty() {
                last.push(' ');
                last.push_str(continuation);
            }
        }
    }

    Plan {
        steps: steps.into_iter().filter(|s| !s.is_empty()).collect(),
    }
}

fn non_empty(plan: Plan) -> Result<Plan> {
    if plan.steps.is_empty() {
        return Err(OpsAgentError::AgentError("planner produced no steps".to_string()));
    }
    Ok(plan)
}

/// Asks for a numbered list in plain text
pub struct TextPlanner {
    broker: Arc<LlmBroker>,
    config: CompletionConfig,
}

impl TextPlanner {
    pub fn new(broker: Arc<LlmBroker>) -> Self {
        Self {
            broker,
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl Planner for TextPlanner {
    async fn plan(&self, objective: &str) -> Result<Plan> {
        let messages = [LlmMessage::system(TEXT_PLANNER_PROMPT), LlmMessage::user(objective)];
        let text = self.broker.generate(&messages, None, Some(self.config.clone())).await?;

        let plan = non_empty(parse_plan(&text))?;
        info!(steps = plan.steps.len(), "Plan created");
        Ok(plan)
    }
}

/// Asks for a `Plan` JSON object through schema-constrained output
pub struct StructuredPlanner {
    broker: Arc<LlmBroker>,
    config: CompletionConfig,
}

impl StructuredPlanner {
    pub fn new(broker: Arc<LlmBroker>) -> Self {
        Self {
            broker,
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }
}

#[async_trait]
impl Planner for StructuredPlanner {
    async fn plan(&self, objective: &str) -> Result<Plan> {
        let messages =
            [LlmMessage::system(STRUCTURED_PLANNER_PROMPT), LlmMessage::user(objective)];
        let plan: Plan =
            self.broker.generate_object(&messages, Some(self.config.clone())).await?;

        let plan = Plan {
            steps: plan
                .steps
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        };

        let plan = non_empty(plan)?;
        info!(steps = plan.steps.len(), "Plan created");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGateway;
    use serde_json::json;

    #[test]
    fn test_parse_plan() {
        let text = "Plan:\n1. Look up customer 8.\n2. Find their zip code.\n3. Given the above steps taken, please respond to the users original question.\n<END_OF_PLAN>";

        let plan = parse_plan(text);

        assert_eq!(
            plan.steps,
            vec![
                "Look up customer 8.",
                "Find their zip code.",
                "Given the above steps taken, please respond to the users original question.",
            ]
        );
    }

    #[test]
    fn test_parse_plan_joins_continuation_lines_and_ignores_trailer() {
        let text = "Plan:\n1) Search for production\n   instances\n2) Patch each one\n<END_OF_PLAN>\n3. not part of the plan";

        let plan = parse_plan(text);

        assert_eq!(plan.steps, vec!["Search for production instances", "Patch each one"]);
    }

    #[test]
    fn test_parse_plan_without_numbers_is_empty() {
        assert!(parse_plan("Plan: just do it").steps.is_empty());
    }

    #[tokio::test]
    async fn test_text_planner() {
        let gateway = Arc::new(ScriptedGateway::with_texts(&[
            "Plan:\n1. Look up customer 8\n2. Answer the question\n<END_OF_PLAN>",
        ]));
        let planner = TextPlanner::new(Arc::new(LlmBroker::new("m", gateway.clone())));

        let plan = planner.plan("Where does customer 8 live?").await.unwrap();

        assert_eq!(plan.steps.len(), 2);
        let request = &gateway.requests()[0];
        assert!(request[0].content.as_deref().unwrap().contains(END_OF_PLAN));
        assert_eq!(request[1].content.as_deref(), Some("Where does customer 8 live?"));
    }

    #[tokio::test]
    async fn test_text_planner_rejects_empty_plan() {
        let gateway = Arc::new(ScriptedGateway::with_texts(&["I cannot plan that."]));
        let planner = TextPlanner::new(Arc::new(LlmBroker::new("m", gateway)));

        let err = planner.plan("?").await.unwrap_err();

        assert!(matches!(err, OpsAgentError::AgentError(_)));
    }

    #[tokio::test]
    async fn test_structured_planner_trims_blank_steps() {
        let gateway = Arc::new(
            ScriptedGateway::new(vec![])
                .with_json(vec![json!({"steps": [" Search instances ", "", "Patch them"]})]),
        );
        let planner = StructuredPlanner::new(Arc::new(LlmBroker::new("m", gateway)));

        let plan = planner.plan("Patch production").await.unwrap();

        assert_eq!(plan.steps, vec!["Search instances", "Patch them"]);
    }
}
