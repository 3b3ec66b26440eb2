//! LintBridge configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::{
    DEFAULT_ERROR_KEYWORD, RuleTableClassifier, SeverityClassifier, SeverityRule,
    SubstringClassifier,
};
use crate::diagnostic::Severity;
use crate::error::ConfigError;
use crate::merger::StalePolicy;
use crate::parser::PathSource;
use crate::runner::ToolCommand;

/// Configuration loaded from `.lintbridge.jsonc` / `.lintbridge.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// External tool to run.
    #[serde(default)]
    pub tool: ToolCommand,

    /// Where report lines get their file path from.
    #[serde(default)]
    pub path_source: PathSource,

    /// Handling of documents a run found nothing for.
    #[serde(default)]
    pub stale_policy: StalePolicy,

    /// Severity classification settings.
    #[serde(default)]
    pub severity: SeverityConfig,

    /// Directory the configuration was loaded from.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Severity classification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeverityConfig {
    /// Substring that marks a message as an error when no rules are set.
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Ordered pattern rules; first match wins.
    #[serde(default)]
    pub rules: Vec<SeverityRuleConfig>,

    /// Severity for messages no rule matches.
    #[serde(default = "default_fallback")]
    pub fallback: Severity,
}

fn default_keyword() -> String {
    DEFAULT_ERROR_KEYWORD.to_string()
}

fn default_fallback() -> Severity {
    Severity::Warning
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            rules: Vec::new(),
            fallback: default_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityRuleConfig {
    pub pattern: String,
    pub severity: Severity,
}

impl Config {
    /// Config file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lintbridge.jsonc", ".lintbridge.json"];

    /// JSONC text of the starter configuration.
    pub const TEMPLATE: &'static str = r#"{
  // External linter invoked as `<program> <args...> <file>`
  "tool": {
    "program": "verible-verilog-lint",
    "args": []
  },
  // "document": attribute every line to the linted file
  // "reported": use the path printed at the start of each line
  "pathSource": "document",
  // "retain": keep old diagnostics when a run reports nothing
  // "clear": empty them instead
  "stalePolicy": "retain",
  "severity": {
    "keyword": "error",
    "rules": []
  }
}
"#;

    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON or JSONC text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(json, &Default::default())
            .map_err(|e| ConfigError::parse(e.to_string()))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.program.trim().is_empty() {
            return Err(ConfigError::invalid("tool.program must not be empty"));
        }
        if self.severity.rules.is_empty() && self.severity.keyword.is_empty() {
            return Err(ConfigError::invalid("severity.keyword must not be empty"));
        }
        Ok(())
    }

    /// Builds the severity classifier described by this configuration.
    ///
    /// Uses a rule table when rules are configured, otherwise the keyword
    /// heuristic.
    pub fn classifier(&self) -> Result<Box<dyn SeverityClassifier>, ConfigError> {
        if self.severity.rules.is_empty() {
            return Ok(Box::new(SubstringClassifier::new(&self.severity.keyword)));
        }

        let rules = self
            .severity
            .rules
            .iter()
            .map(|rule| SeverityRule::new(&rule.pattern, rule.severity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Box::new(RuleTableClassifier::new(
            rules,
            self.severity.fallback,
        )))
    }

    /// Starter configuration written by `lintbridge init`.
    pub fn template() -> &'static str {
        Self::TEMPLATE
    }
}
