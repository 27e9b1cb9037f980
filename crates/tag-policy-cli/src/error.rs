//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Policy input rejected by the compiler
    #[error(transparent)]
    Policy(#[from] tag_policy::TagPolicyError),

    /// Configuration file could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or rendering error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
