//! The document-to-diagnostics map owned by the consumer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostic::DiagnosticRecord;

/// Diagnostics keyed by document identity.
///
/// Keys are the document path strings supplied to the pipeline, used
/// verbatim. Records for a document keep report-line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticCollection {
    documents: BTreeMap<String, Vec<DiagnosticRecord>>,
}

impl DiagnosticCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the diagnostics for a document, if it has an entry.
    pub fn get(&self, document: &str) -> Option<&[DiagnosticRecord]> {
        self.documents.get(document).map(Vec::as_slice)
    }

    /// Returns true if the document has an entry (possibly empty).
    pub fn contains(&self, document: &str) -> bool {
        self.documents.contains_key(document)
    }

    /// Replaces a document's diagnostics wholesale.
    pub fn replace(&mut self, document: impl Into<String>, records: Vec<DiagnosticRecord>) {
        self.documents.insert(document.into(), records);
    }

    /// Appends one record to a document's diagnostics.
    pub fn append(&mut self, document: &str, record: DiagnosticRecord) {
        match self.documents.get_mut(document) {
            Some(records) => records.push(record),
            None => {
                self.documents.insert(document.to_string(), vec![record]);
            }
        }
    }

    /// Empties a document's diagnostics but keeps its entry.
    pub fn clear_document(&mut self, document: &str) {
        self.documents.insert(document.to_string(), Vec::new());
    }

    /// Removes a document's entry entirely.
    pub fn remove(&mut self, document: &str) -> Option<Vec<DiagnosticRecord>> {
        self.documents.remove(document)
    }

    /// Iterates over documents in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DiagnosticRecord])> {
        self.documents
            .iter()
            .map(|(path, records)| (path.as_str(), records.as_slice()))
    }

    /// Number of documents with an entry.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of records across all documents.
    pub fn record_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }

    /// Returns true if any document has an error-level record.
    pub fn has_errors(&self) -> bool {
        self.documents
            .values()
            .flatten()
            .any(DiagnosticRecord::is_error)
    }
}
