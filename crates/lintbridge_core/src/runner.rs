//! Runs the external analysis tool and captures its output.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RunnerError;

/// Default linter executable.
pub const DEFAULT_PROGRAM: &str = "verible-verilog-lint";

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Set when the tool exited unsuccessfully.
    pub error: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ToolOutput {
    /// Creates an output holding only stdout text.
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: Some(stdout.into()),
            ..Default::default()
        }
    }
}

/// Handle for the document a run analyzes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub uri: String,
    pub version: Option<i32>,
}

impl SourceDocument {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }
}

/// The tool executable and its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the file path.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
        }
    }
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Runs the tool on `path`, blocking until it exits.
    ///
    /// A non-zero exit status is not an `Err`: linters exit non-zero when
    /// they report findings. It is recorded in [`ToolOutput::error`].
    pub fn run(&self, path: &Path) -> Result<ToolOutput, RunnerError> {
        debug!("Running {} on {}", self.program, path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|source| RunnerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let error = (!output.status.success())
            .then(|| format!("`{}` exited with {}", self.program, output.status));

        Ok(ToolOutput {
            error,
            stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
        })
    }
}
