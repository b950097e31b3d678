//! Runtime settings read from the environment.
//!
//! Demos call [`Settings::load`], which reads a `.env` file (when present)
//! before looking at the process environment. Tests build settings through
//! [`Settings::from_lookup`] so they never touch global state.

use crate::error::{OpsAgentError, Result};
use crate::llm::gateways::ollama::DEFAULT_OLLAMA_HOST;
use crate::llm::gateways::openai::DEFAULT_OPENAI_BASE_URL;
use crate::llm::gateways::{OllamaConfig, OllamaGateway, OpenAIConfig, OpenAIGateway};
use crate::llm::{CompletionConfig, LlmBroker, LlmGateway};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Which model host the agents talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Ollama,
}

impl FromStr for Provider {
    type Err = OpsAgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "ollama" => Ok(Provider::Ollama),
            other => Err(OpsAgentError::ConfigError(format!(
                "unknown LLM_PROVIDER '{}', expected 'openai' or 'ollama'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    pub model: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_tokens: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub ollama_host: String,
    pub serpapi_api_key: Option<String>,
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = match get("LLM_PROVIDER") {
            Some(p) => p.parse()?,
            None => Provider::OpenAI,
        };

        let default_model = match provider {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Ollama => "qwen3:8b",
        };

        Ok(Self {
            provider,
            model: get("LLM_MODEL").unwrap_or_else(|| default_model.to_string()),
            temperature: parse_var("LLM_TEMPERATURE", get("LLM_TEMPERATURE"))?.unwrap_or(0.0),
            top_p: parse_var("LLM_TOP_P", get("LLM_TOP_P"))?,
            max_tokens: parse_var("LLM_MAX_TOKENS", get("LLM_MAX_TOKENS"))?.unwrap_or(1024),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            ollama_host: get("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            serpapi_api_key: get("SERPAPI_API_KEY"),
        })
    }

    /// Generation parameters for every model call
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            ..Default::default()
        }
    }

    pub fn gateway(&self) -> Result<Arc<dyn LlmGateway>> {
        info!(provider = ?self.provider, model = %self.model, "Building LLM gateway");
        match self.provider {
            Provider::OpenAI => {
                let api_key = self.openai_api_key.clone().ok_or_else(|| {
                    OpsAgentError::ConfigError(
                        "OPENAI_API_KEY must be set when LLM_PROVIDER is openai".to_string(),
                    )
                })?;
                Ok(Arc::new(OpenAIGateway::with_config(OpenAIConfig {
                    api_key,
                    base_url: self.openai_base_url.clone(),
                    timeout: None,
                })?))
            }
            Provider::Ollama => Ok(Arc::new(OllamaGateway::with_config(OllamaConfig {
                host: self.ollama_host.clone(),
                timeout: None,
            })?)),
        }
    }

    pub fn broker(&self) -> Result<LlmBroker> {
        Ok(LlmBroker::new(self.model.clone(), self.gateway()?))
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| OpsAgentError::ConfigError(format!("{} has invalid value '{}'", key, v)))
        })
        .transpose()
}
