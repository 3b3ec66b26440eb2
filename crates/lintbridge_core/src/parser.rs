//! Splits raw tool output into candidate records.
//!
//! Each report line has the shape `<location>:<line>:<column>:<message...>`
//! with 1-based positions. The message keeps any further colons.

use serde::{Deserialize, Serialize};

use crate::diagnostic::{CandidateRecord, Severity};
use crate::error::ParseError;

/// Where a candidate's file path comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSource {
    /// Attribute every line to the document the tool was run on.
    #[default]
    Document,
    /// Use the location prefix of each line, falling back to the document.
    Reported,
}

/// Line-oriented parser over one tool invocation's output.
#[derive(Debug, Clone)]
pub struct LineParser<'a> {
    text: &'a str,
    path_source: PathSource,
}

impl<'a> LineParser<'a> {
    /// Creates a parser, failing with [`ParseError::NoInput`] for absent or empty text.
    pub fn new(output: Option<&'a str>) -> Result<Self, ParseError> {
        match output {
            Some(text) if !text.is_empty() => Ok(Self {
                text,
                path_source: PathSource::default(),
            }),
            _ => Err(ParseError::NoInput),
        }
    }

    /// Sets where candidate paths come from.
    pub fn with_path_source(mut self, path_source: PathSource) -> Self {
        self.path_source = path_source;
        self
    }

    /// Returns a lazy iterator over candidates, one per non-empty line.
    ///
    /// Severity is left at its default; classification happens downstream.
    pub fn records<'b>(&'b self, document_path: &'b str) -> impl Iterator<Item = CandidateRecord> + 'b {
        self.text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(move |line| parse_line(line, document_path, self.path_source))
    }
}

/// Splits one report line into a candidate record.
pub fn parse_line(line: &str, document_path: &str, path_source: PathSource) -> CandidateRecord {
    let mut fields = line.split(':');
    let location = fields.next().unwrap_or_default();
    let line_field = fields.next();
    let column_field = fields.next();
    let message = fields.collect::<Vec<_>>().join(":");

    let file_path = match path_source {
        PathSource::Reported if !location.trim().is_empty() => location.trim().to_string(),
        _ => document_path.to_string(),
    };

    CandidateRecord {
        file_path,
        line: line_field.and_then(parse_position),
        column: column_field.and_then(parse_position),
        severity: Severity::default(),
        message,
    }
}

/// Parses a 1-based position field into a 0-based index.
fn parse_position(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok().and_then(|n| n.checked_sub(1))
}
