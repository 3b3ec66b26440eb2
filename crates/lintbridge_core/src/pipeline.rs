//! One pass from captured tool output to committed diagnostics.

use std::fmt;

use tracing::{debug, trace};

use crate::classifier::{SeverityClassifier, SubstringClassifier};
use crate::collection::DiagnosticCollection;
use crate::config::Config;
use crate::error::{ConfigError, ParseError};
use crate::merger::{CollectionMerger, StalePolicy};
use crate::parser::{LineParser, PathSource};
use crate::runner::{SourceDocument, ToolOutput};

/// Parses, classifies and merges tool output into a [`DiagnosticCollection`].
///
/// A run never fails: missing output is a no-op and malformed lines are
/// dropped. The pipeline holds no per-run state and can be shared.
pub struct DiagnosticPipeline {
    classifier: Box<dyn SeverityClassifier>,
    path_source: PathSource,
    stale_policy: StalePolicy,
}

impl fmt::Debug for DiagnosticPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticPipeline")
            .field("classifier", &"<dyn SeverityClassifier>")
            .field("path_source", &self.path_source)
            .field("stale_policy", &self.stale_policy)
            .finish()
    }
}

impl Default for DiagnosticPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticPipeline {
    /// Creates a pipeline with the keyword classifier and default policies.
    pub fn new() -> Self {
        Self {
            classifier: Box::new(SubstringClassifier::default()),
            path_source: PathSource::default(),
            stale_policy: StalePolicy::default(),
        }
    }

    /// Creates a pipeline from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: config.classifier()?,
            path_source: config.path_source,
            stale_policy: config.stale_policy,
        })
    }

    pub fn with_classifier(mut self, classifier: impl SeverityClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_path_source(mut self, path_source: PathSource) -> Self {
        self.path_source = path_source;
        self
    }

    pub fn with_stale_policy(mut self, stale_policy: StalePolicy) -> Self {
        self.stale_policy = stale_policy;
        self
    }

    /// Policy for a target document the run committed nothing for.
    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Structures one invocation's output into `collection`.
    ///
    /// Only `output.stdout` is read. Without a `document` the run does
    /// nothing.
    pub fn run(
        &self,
        output: &ToolOutput,
        document: Option<&SourceDocument>,
        document_path: &str,
        collection: &mut DiagnosticCollection,
    ) {
        let Some(document) = document else {
            debug!("No document for {}, skipping", document_path);
            return;
        };

        let parser = match LineParser::new(output.stdout.as_deref()) {
            Ok(parser) => parser.with_path_source(self.path_source),
            Err(ParseError::NoInput) => {
                debug!("No output for {}, nothing to parse", document.uri);
                return;
            }
        };

        let mut merger = CollectionMerger::new(collection);
        let mut dropped = 0usize;

        for mut candidate in parser.records(document_path) {
            candidate.severity = self.classifier.classify(&candidate.message);
            match candidate.into_well_formed() {
                Some(record) => merger.commit(record),
                None => {
                    trace!("Dropping malformed report line in {}", document_path);
                    dropped += 1;
                }
            }
        }

        debug!(
            "Parsed {} diagnostics for {} ({} lines dropped)",
            merger.committed(),
            document_path,
            dropped
        );

        merger.finish(document_path, self.stale_policy);
    }
}
