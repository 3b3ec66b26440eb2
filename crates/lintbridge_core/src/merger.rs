//! Commits records into a [`DiagnosticCollection`] with replace-then-append
//! semantics.
//!
//! The first record a run commits for a document replaces whatever that
//! document held before; later records from the same run are appended.
//! A merger lives for exactly one run, so its visited set starts empty.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::collection::DiagnosticCollection;
use crate::diagnostic::DiagnosticRecord;

/// What to do with a target document that received no records in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Leave the document's previous diagnostics untouched.
    #[default]
    Retain,
    /// Empty the document's diagnostics.
    Clear,
}

/// Run-scoped writer over a shared collection.
#[derive(Debug)]
pub struct CollectionMerger<'a> {
    collection: &'a mut DiagnosticCollection,
    visited: HashSet<String>,
    committed: usize,
}

impl<'a> CollectionMerger<'a> {
    pub fn new(collection: &'a mut DiagnosticCollection) -> Self {
        Self {
            collection,
            visited: HashSet::new(),
            committed: 0,
        }
    }

    /// Commits one well-formed record.
    pub fn commit(&mut self, record: DiagnosticRecord) {
        self.committed += 1;
        let document = record.file_path.clone();

        if self.visited.contains(&document) {
            self.collection.append(&document, record);
        } else {
            trace!("Replacing diagnostics for {}", document);
            self.visited.insert(document.clone());
            self.collection.replace(document, vec![record]);
        }
    }

    /// Returns true if the document already received a record in this run.
    pub fn has_visited(&self, document: &str) -> bool {
        self.visited.contains(document)
    }

    /// Number of records committed so far.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Ends the run, applying `policy` to `target` if it was never visited.
    pub fn finish(self, target: &str, policy: StalePolicy) {
        if policy == StalePolicy::Clear && !self.visited.contains(target) {
            trace!("Clearing stale diagnostics for {}", target);
            self.collection.clear_document(target);
        }
    }
}
