//! Adapter for converting LLM messages to and from the OpenAI chat format.

use crate::error::Result;
use crate::llm::models::{LlmMessage, LlmToolCall, MessageRole};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Adapt LLM messages to OpenAI format.
pub fn adapt_messages_to_openai(messages: &[LlmMessage]) -> Result<Vec<Value>> {
    messages
        .iter()
        .map(|msg| {
            let content = msg.content.as_deref().unwrap_or("");
            let openai_msg = match msg.role {
                MessageRole::System | MessageRole::User => json!({
                    "role": msg.role.as_str(),
                    "content": content
                }),
                MessageRole::Assistant => {
                    let mut assistant_msg = json!({ "role": "assistant" });

                    if let Some(ref content) = msg.content {
                        assistant_msg["content"] = json!(content);
                    }

                    if let Some(ref tool_calls) = msg.tool_calls {
                        let formatted_calls = tool_calls
                            .iter()
                            .map(|tc| {
                                Ok(json!({
                                    "id": tc.id.as_deref().unwrap_or(""),
                                    "type": "function",
                                    "function": {
                                        "name": tc.name,
                                        "arguments": serde_json::to_string(&tc.arguments)?
                                    }
                                }))
                            })
                            .collect::<Result<Vec<Value>>>()?;
                        assistant_msg["tool_calls"] = json!(formatted_calls);
                    }

                    assistant_msg
                }
                MessageRole::Tool => {
                    // Tool messages answer the first call they carry
                    let tool_call_id = msg
                        .tool_calls
                        .as_ref()
                        .and_then(|tcs| tcs.first())
                        .and_then(|tc| tc.id.clone())
                        .unwrap_or_default();

                    json!({
                        "role": "tool",
                        "content": content,
                        "tool_call_id": tool_call_id
                    })
                }
            };
            Ok(openai_msg)
        })
        .collect()
}

/// Convert tool calls from OpenAI format to internal format.
///
/// OpenAI sends arguments as a JSON-encoded string; unparseable arguments
/// become an empty map rather than dropping the call.
pub fn convert_tool_calls(tool_calls: &[Value]) -> Vec<LlmToolCall> {
    tool_calls
        .iter()
        .filter_map(|tc| {
            let id = tc["id"].as_str().map(String::from);
            let name = tc["function"]["name"].as_str()?.to_string();
            let args_str = tc["function"]["arguments"].as_str().unwrap_or("{}");

            let arguments: HashMap<String, Value> =
                serde_json::from_str(args_str).unwrap_or_default();

            Some(LlmToolCall {
                id,
                name,
                arguments,
            })
        })
        .collect()
}
