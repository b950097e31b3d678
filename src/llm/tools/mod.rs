mod function_tool;
mod tool;

pub use function_tool::FunctionTool;
pub use tool::{FunctionDescriptor, LlmTool, ToolDescriptor};
