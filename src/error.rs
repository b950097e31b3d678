//! Error types and result aliases for the opsagent library.
//!
//! [`OpsAgentError`] covers every failure the gateways, tools and agents can
//! surface. All public APIs that can fail return [`Result<T>`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsAgentError {
    #[error("LLM gateway error: {0}")]
    GatewayError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tool error: {0}")]
    ToolError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Could not parse model output: {0}")]
    ParseError(String),

    #[error("Agent error: {0}")]
    AgentError(String),
}

pub type Result<T> = std::result::Result<T, OpsAgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let err = OpsAgentError::GatewayError("connection failed".to_string());
        assert_eq!(err.to_string(), "LLM gateway error: connection failed");
    }

    #[test]
    fn test_tool_error_display() {
        let err = OpsAgentError::ToolError("invalid parameters".to_string());
        assert_eq!(err.to_string(), "Tool error: invalid parameters");
    }

    #[test]
    fn test_config_error_display() {
        let err = OpsAgentError::ConfigError("missing API key".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing API key");
    }

    #[test]
    fn test_parse_error_display() {
        let err = OpsAgentError::ParseError("no action".to_string());
        assert_eq!(err.to_string(), "Could not parse model output: no action");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: OpsAgentError = json_err.into();

        match err {
            OpsAgentError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OpsAgentError = io_err.into();

        match err {
            OpsAgentError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }
}
