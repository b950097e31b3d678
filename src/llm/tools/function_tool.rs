use crate::error::{OpsAgentError, Result};
use crate::llm::tools::{LlmTool, ToolDescriptor};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ToolFn = dyn Fn(&str) -> Result<String> + Send + Sync;

/// A named one-argument function exposed to agents as a tool
///
/// The function receives the tool input as text and answers with text, which
/// is what a text-driven agent loop passes around. The description is what the
/// model reads when deciding whether to call it.
///
/// # Examples
///
/// ```
/// use opsagent::llm::tools::{FunctionTool, LlmTool};
///
/// let tool = FunctionTool::new("echo", "Repeats the input back.", |input| Ok(input.to_string()));
/// assert_eq!(tool.name(), "echo");
/// ```
#[derive(Clone)]
pub struct FunctionTool {
    name: String,
    description: String,
    func: Arc<ToolFn>,
}

impl FunctionTool {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            func: Arc::new(func),
        }
    }

    /// Call the function directly with text input
    pub fn call(&self, input: &str) -> Result<String> {
        (self.func)(input)
    }

    /// Pull the single text input out of structured tool arguments.
    ///
    /// Models calling through native tool calls sometimes rename the argument,
    /// so a lone argument of any name is accepted too.
    fn extract_input(&self, args: &HashMap<String, Value>) -> Result<String> {
        let lone = if args.len() == 1 { args.values().next() } else { None };
        let value = args.get("input").or(lone).ok_or_else(|| {
            OpsAgentError::InvalidArgument(format!(
                "tool '{}' expects a single 'input' argument",
                self.name
            ))
        })?;

        Ok(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

#[async_trait]
impl LlmTool for FunctionTool {
    async fn run(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let input = self.extract_input(args)?;
        Ok(json!(self.call(&input)?))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::function(
            self.name.clone(),
            self.description.clone(),
            json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": "The input for this tool."
                    }
                },
                "required": ["input"]
            }),
        )
    }
}
