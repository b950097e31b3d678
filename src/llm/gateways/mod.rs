pub mod ollama;
pub mod openai;
pub mod openai_messages_adapter;

pub use ollama::{OllamaConfig, OllamaGateway};
pub use openai::{OpenAIConfig, OpenAIGateway};
