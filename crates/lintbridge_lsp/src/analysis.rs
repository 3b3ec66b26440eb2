//! Runs the analyzer for one document and collects what to publish.

use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, error};

use lintbridge_core::{SourceDocument, StalePolicy};

use crate::conversion::to_lsp_diagnostics;
use crate::state::BackendState;

/// Diagnostics ready to be sent with `textDocument/publishDiagnostics`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Publication {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
    pub version: Option<i32>,
}

/// Runs the tool on the file behind `uri` and merges the result into the
/// shared collection.
///
/// Blocks on the external process; call from a blocking thread. Returns one
/// publication per document whose diagnostics the run changed, plus the
/// analyzed document itself when it has an entry.
pub(crate) fn analyze(state: &BackendState, uri: &Url, version: Option<i32>) -> Vec<Publication> {
    let path = match uri.to_file_path() {
        Ok(p) => p,
        Err(_) => {
            debug!("Skipping analysis for non-file URI: {}", uri);
            return vec![];
        }
    };

    let analyzer = match state.analyzer.read() {
        Ok(guard) => guard.clone(),
        Err(e) => {
            error!("Analyzer lock poisoned: {}", e);
            return vec![];
        }
    };

    let output = match analyzer.tool.run(&path) {
        Ok(output) => output,
        Err(e) => {
            error!("Analysis failed for {}: {}", uri, e);
            return vec![];
        }
    };
    if let Some(status) = &output.error {
        debug!("{}", status);
    }

    let document_path = path.to_string_lossy().into_owned();
    let mut document = SourceDocument::new(uri.to_string());
    if let Some(version) = version {
        document = document.with_version(version);
    }

    let mut collection = match state.collection.lock() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Diagnostics lock poisoned: {}", e);
            return vec![];
        }
    };

    let before = collection.clone();
    analyzer
        .pipeline
        .run(&output, Some(&document), &document_path, &mut collection);

    // A clean file produces no output at all, which the pipeline skips.
    let silent = output.stdout.as_deref().is_none_or(str::is_empty);
    if silent && analyzer.pipeline.stale_policy() == StalePolicy::Clear {
        debug!("No output for {}, clearing stale diagnostics", uri);
        collection.clear_document(&document_path);
    }

    collection
        .iter()
        .filter(|&(key, records)| key == document_path || before.get(key) != Some(records))
        .filter_map(|(key, records)| {
            let target = Url::from_file_path(key).ok()?;
            Some(Publication {
                uri: target,
                diagnostics: to_lsp_diagnostics(records),
                version: (key == document_path).then_some(version).flatten(),
            })
        })
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::state::Analyzer;
    use lintbridge_core::{Config, DiagnosticRecord, Severity};
    use tower_lsp::lsp_types::DiagnosticSeverity;

    fn state_for(json: &str) -> BackendState {
        let config = Config::from_json(json).unwrap();
        BackendState::with_analyzer(Analyzer::from_config(&config).unwrap())
    }

    #[test]
    fn test_analyze_publishes_target_document() {
        let state = state_for(
            r#"{ "tool": { "program": "echo", "args": ["tool:2:1:error: undeclared signal"] } }"#,
        );
        let uri = Url::parse("file:///tmp/lintbridge/foo.sv").unwrap();

        let publications = analyze(&state, &uri, Some(3));

        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].uri, uri);
        assert_eq!(publications[0].version, Some(3));
        let diag = &publications[0].diagnostics[0];
        assert_eq!(diag.range.start.line, 1);
        assert_eq!(diag.severity, Some(DiagnosticSeverity::ERROR));
        assert!(diag.message.starts_with("error: undeclared signal"));

        let collection = state.collection.lock().unwrap();
        assert_eq!(collection.get("/tmp/lintbridge/foo.sv").unwrap().len(), 1);
    }

    #[test]
    fn test_analyze_keeps_other_documents_quiet() {
        let state = state_for(
            r#"{ "tool": { "program": "echo", "args": ["tool:1:1:unused"] } }"#,
        );
        state.collection.lock().unwrap().replace(
            "/tmp/lintbridge/other.sv",
            vec![DiagnosticRecord::new("/tmp/lintbridge/other.sv", 0, 0, Severity::Error, "x")],
        );
        let uri = Url::parse("file:///tmp/lintbridge/foo.sv").unwrap();

        let publications = analyze(&state, &uri, None);

        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].uri, uri);
    }

    #[test]
    fn test_silent_tool_clears_stale_diagnostics() {
        let state = state_for(r#"{ "tool": { "program": "true" }, "stalePolicy": "clear" }"#);
        state.collection.lock().unwrap().replace(
            "/tmp/lintbridge/foo.sv",
            vec![DiagnosticRecord::new("/tmp/lintbridge/foo.sv", 0, 0, Severity::Error, "old")],
        );
        let uri = Url::parse("file:///tmp/lintbridge/foo.sv").unwrap();

        let publications = analyze(&state, &uri, Some(2));

        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].uri, uri);
        assert!(publications[0].diagnostics.is_empty());
        let collection = state.collection.lock().unwrap();
        assert!(collection.get("/tmp/lintbridge/foo.sv").unwrap().is_empty());
    }

    #[test]
    fn test_silent_tool_retains_by_default() {
        let state = state_for(r#"{ "tool": { "program": "true" } }"#);
        state.collection.lock().unwrap().replace(
            "/tmp/lintbridge/foo.sv",
            vec![DiagnosticRecord::new("/tmp/lintbridge/foo.sv", 0, 0, Severity::Error, "old")],
        );
        let uri = Url::parse("file:///tmp/lintbridge/foo.sv").unwrap();

        let publications = analyze(&state, &uri, None);

        assert_eq!(publications.len(), 1);
        assert_eq!(publications[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_missing_tool_publishes_nothing() {
        let state = state_for(r#"{ "tool": { "program": "lintbridge-missing-tool" } }"#);
        let uri = Url::parse("file:///tmp/lintbridge/foo.sv").unwrap();

        assert!(analyze(&state, &uri, None).is_empty());
        assert!(state.collection.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_file_uri_is_skipped() {
        let state = BackendState::new();
        let uri = Url::parse("untitled:Untitled-1").unwrap();

        assert!(analyze(&state, &uri, None).is_empty());
    }
}
