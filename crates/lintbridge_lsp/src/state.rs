//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use tower_lsp::lsp_types::Url;

use lintbridge_core::{
    Config, ConfigError, DiagnosticCollection, DiagnosticPipeline, ToolCommand,
};

/// Open document version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub version: i32,
}

/// The tool to run together with the pipeline that structures its output.
#[derive(Debug)]
pub(crate) struct Analyzer {
    pub tool: ToolCommand,
    pub pipeline: DiagnosticPipeline,
}

impl Analyzer {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            tool: config.tool.clone(),
            pipeline: DiagnosticPipeline::from_config(config)?,
        })
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            tool: ToolCommand::default(),
            pipeline: DiagnosticPipeline::new(),
        }
    }
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Open documents.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Diagnostics for every analyzed document, keyed by file path.
    ///
    /// Held only for the duration of one pipeline run, which serializes
    /// runs that touch the same document.
    pub collection: Mutex<DiagnosticCollection>,
    /// Current analyzer, swapped on config reload.
    pub analyzer: RwLock<Arc<Analyzer>>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("collection", &"<DiagnosticCollection>")
            .field("analyzer", &self.analyzer)
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a new state with the default analyzer.
    pub fn new() -> Self {
        Self::with_analyzer(Analyzer::default())
    }

    pub fn with_analyzer(analyzer: Analyzer) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            collection: Mutex::new(DiagnosticCollection::new()),
            analyzer: RwLock::new(Arc::new(analyzer)),
            workspace_root: RwLock::new(None),
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
