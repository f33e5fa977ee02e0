//! Error types for notation discovery, payload decoding and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while discovering or screening dependency references.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed dependency '{0}': expected '<node-label>:!:<variables>'")]
    MalformedDependency(String),

    #[error("dependency '{0}' has a whitespace-only node label")]
    EmptyNodeLabel(String),

    #[error("dependency '{0}' has a whitespace-only variable name")]
    EmptyVariableName(String),

    #[error("invalid dynamic variable '{name}': contains blacklisted token '{token}'")]
    BlacklistedVariable { name: String, token: String },
}

/// Request-shape failures, raised before the engine runs.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("target field is missing")]
    MissingTarget,

    #[error("dependencies must be a JSON object")]
    InvalidDependencies,

    #[error("target is of an unsupported type: {0}")]
    UnsupportedTarget(&'static str),
}

/// Engine configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("blacklist entry {0} is empty and would reject every variable")]
    EmptyBlacklistToken(usize),
}
