//! Domain error types

use thiserror::Error;

/// Error when a Content-Type does not map to any known audio encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported audio format: {content_type}")]
pub struct UnsupportedContentTypeError {
    pub content_type: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_content_type_echoes_input() {
        let err = UnsupportedContentTypeError {
            content_type: "audio/wav".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported audio format: audio/wav");
    }

    #[test]
    fn validation_error_names_key() {
        let err = ConfigError::ValidationError {
            key: "port".to_string(),
            message: "must be a number".to_string(),
        };
        assert!(err.to_string().contains("'port'"));
    }
}
