//! LintBridge LSP Server
//!
//! Runs the configured linter when documents are opened or saved and
//! publishes the structured results to the editor.

mod analysis;
mod config;
pub mod conversion;
mod handler;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use crate::analysis::analyze;
use crate::state::{BackendState, SharedState};

/// The LSP backend for LintBridge.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// The default analyzer is used until `initialize` finds a workspace
    /// config.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Analyzes a document and publishes every diagnostic set it changed.
    async fn validate_document(&self, uri: Url, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        // The tool is an external process; keep it off the async runtime.
        let state = self.state.clone();
        let publications =
            match tokio::task::spawn_blocking(move || analyze(&state, &uri, version)).await {
                Ok(publications) => publications,
                Err(e) => {
                    error!("Analysis task failed: {}", e);
                    return;
                }
            };

        for publication in publications {
            self.client
                .publish_diagnostics(publication.uri, publication.diagnostics, publication.version)
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let (uri, version) = handler::handle_did_open(&self.state, params).await;
        self.validate_document(uri, version).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let (uri, version) = handler::handle_did_save(&self.state, params).await;
        self.validate_document(uri, version).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handler::handle_did_change_watched_files(&self.state, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, params).await;

        self.client.publish_diagnostics(uri, vec![], None).await;
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("LintBridge LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
