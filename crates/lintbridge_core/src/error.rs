//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while splitting tool output.
///
/// The pipeline swallows these: no input simply means no diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tool produced no output at all.
    #[error("No tool output to parse")]
    NoInput,
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON/JSONC.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// The configuration is syntactically valid but has bad values.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// A severity rule pattern is not a valid regular expression.
    #[error("Invalid severity pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an invalid-value error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Errors that can occur while running the external tool.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The tool process could not be started.
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
