//! # lintbridge_core
//!
//! Turns the textual report of an external linter into structured,
//! per-document diagnostics.
//!
//! This crate provides:
//! - The line parser for `<location>:<line>:<column>:<message>` reports
//! - Pluggable severity classification
//! - The replace-then-append collection merger
//! - Configuration loading and the tool runner
//!
//! ## Example
//!
//! ```rust
//! use lintbridge_core::{
//!     DiagnosticCollection, DiagnosticPipeline, Severity, SourceDocument, ToolOutput,
//! };
//!
//! let output = ToolOutput::from_stdout(
//!     "tool:2:1:error: undeclared signal\ntool:5:3:unused variable\n",
//! );
//! let document = SourceDocument::new("file:///x/foo.sv");
//! let mut collection = DiagnosticCollection::new();
//!
//! DiagnosticPipeline::new().run(&output, Some(&document), "/x/foo.sv", &mut collection);
//!
//! let records = collection.get("/x/foo.sv").unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].severity, Severity::Error);
//! assert_eq!((records[1].line, records[1].column), (4, 2));
//! ```

pub mod classifier;
mod collection;
mod config;
mod diagnostic;
mod error;
pub mod merger;
pub mod parser;
mod pipeline;
pub mod runner;

pub use classifier::{
    RuleTableClassifier, SeverityClassifier, SeverityRule, SubstringClassifier,
};
pub use collection::DiagnosticCollection;
pub use config::{Config, SeverityConfig, SeverityRuleConfig};
pub use diagnostic::{CandidateRecord, DiagnosticRecord, Severity};
pub use error::{ConfigError, ParseError, RunnerError};
pub use merger::{CollectionMerger, StalePolicy};
pub use parser::{LineParser, PathSource};
pub use pipeline::DiagnosticPipeline;
pub use runner::{SourceDocument, ToolCommand, ToolOutput};
