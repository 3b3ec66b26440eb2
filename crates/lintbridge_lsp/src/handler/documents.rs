//! Document lifecycle handlers (open, save, close).

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::state::{DocumentData, SharedState};

/// Handles the `textDocument/didOpen` notification.
///
/// Returns the URI and version to analyze.
pub async fn handle_did_open(
    state: &SharedState,
    params: DidOpenTextDocumentParams,
) -> (Url, Option<i32>) {
    debug!("Document opened: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    let version = params.text_document.version;

    match state.documents.write() {
        Ok(mut docs) => {
            docs.insert(uri.clone(), DocumentData { version });
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }

    (uri, Some(version))
}

/// Handles the `textDocument/didSave` notification.
pub async fn handle_did_save(
    state: &SharedState,
    params: DidSaveTextDocumentParams,
) -> (Url, Option<i32>) {
    debug!("Document saved: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    let version = match state.documents.read() {
        Ok(docs) => docs.get(&uri).map(|doc| doc.version),
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            None
        }
    };

    (uri, version)
}

/// Handles the `textDocument/didClose` notification.
///
/// Forgets the document and its diagnostics.
pub async fn handle_did_close(state: &SharedState, params: DidCloseTextDocumentParams) -> Url {
    debug!("Document closed: {}", params.text_document.uri);

    let uri = params.text_document.uri;

    match state.documents.write() {
        Ok(mut docs) => {
            docs.remove(&uri);
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }

    if let Ok(path) = uri.to_file_path() {
        match state.collection.lock() {
            Ok(mut collection) => {
                collection.remove(&path.to_string_lossy());
            }
            Err(e) => error!("Diagnostics lock poisoned: {}", e),
        }
    }

    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lintbridge_core::{DiagnosticRecord, Severity};

    use crate::state::BackendState;

    fn open_params(uri: &Url, version: i32) -> DidOpenTextDocumentParams {
        DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(
                uri.clone(),
                "systemverilog".to_string(),
                version,
                "module top; endmodule\n".to_string(),
            ),
        }
    }

    #[tokio::test]
    async fn test_open_save_close_lifecycle() {
        let state: SharedState = Arc::new(BackendState::new());
        let uri = Url::parse("file:///tmp/lintbridge/top.sv").unwrap();

        let (opened, version) = handle_did_open(&state, open_params(&uri, 4)).await;
        assert_eq!(opened, uri);
        assert_eq!(version, Some(4));

        let (saved, version) = handle_did_save(
            &state,
            DidSaveTextDocumentParams {
                text_document: TextDocumentIdentifier::new(uri.clone()),
                text: None,
            },
        )
        .await;
        assert_eq!(saved, uri);
        assert_eq!(version, Some(4));

        state.collection.lock().unwrap().replace(
            "/tmp/lintbridge/top.sv",
            vec![DiagnosticRecord::new("/tmp/lintbridge/top.sv", 0, 0, Severity::Error, "x")],
        );

        let closed = handle_did_close(
            &state,
            DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier::new(uri.clone()),
            },
        )
        .await;
        assert_eq!(closed, uri);
        assert!(state.documents.read().unwrap().is_empty());
        assert!(state.collection.lock().unwrap().is_empty());
    }
}
