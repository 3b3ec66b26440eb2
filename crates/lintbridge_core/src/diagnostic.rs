//! Diagnostic record types.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
}

impl Severity {
    /// Returns the lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single finding reported by the external tool.
///
/// Line and column are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    /// Path of the file the finding applies to.
    pub file_path: String,

    /// Zero-based line index.
    pub line: u32,

    /// Zero-based column index.
    pub column: u32,

    /// Severity level.
    pub severity: Severity,

    /// The diagnostic message, verbatim from the report.
    pub message: String,
}

impl DiagnosticRecord {
    /// Creates a new record.
    pub fn new(
        file_path: impl Into<String>,
        line: u32,
        column: u32,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
            severity,
            message: message.into(),
        }
    }

    /// Returns true if this record is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A record as split out of one report line, before validation.
///
/// `None` positions mark fields that were missing or not numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Path the record is attributed to.
    pub file_path: String,
    /// Line number (0-based), if the field parsed.
    pub line: Option<i64>,
    /// Column number (0-based), if the field parsed.
    pub column: Option<i64>,
    /// Severity, set by the classifier.
    pub severity: Severity,
    /// Message text, with embedded colons restored.
    pub message: String,
}

impl CandidateRecord {
    /// Returns true if the record has a path, non-negative position and a message.
    pub fn is_well_formed(&self) -> bool {
        !self.file_path.is_empty()
            && !self.message.is_empty()
            && self.line.is_some_and(|l| (0..=u32::MAX as i64).contains(&l))
            && self.column.is_some_and(|c| (0..=u32::MAX as i64).contains(&c))
    }

    /// Converts into a [`DiagnosticRecord`], or `None` if malformed.
    pub fn into_well_formed(self) -> Option<DiagnosticRecord> {
        if !self.is_well_formed() {
            return None;
        }

        let line = u32::try_from(self.line?).ok()?;
        let column = u32::try_from(self.column?).ok()?;

        Some(DiagnosticRecord {
            file_path: self.file_path,
            line,
            column,
            severity: self.severity,
            message: self.message,
        })
    }
}
