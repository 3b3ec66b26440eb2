//! Configuration management for LSP server.

use std::sync::Arc;

use tracing::{error, info};

use lintbridge_core::Config;

use crate::state::{Analyzer, BackendState};

/// Reloads configuration from the workspace root.
///
/// On failure the previous analyzer stays in place.
pub fn reload_config(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let Some(path) = root else {
        return;
    };

    let Some(config_path) = Config::discover(&path) else {
        return;
    };

    info!("Found config file: {}", config_path.display());
    let analyzer = match Config::from_file(&config_path).and_then(|c| Analyzer::from_config(&c)) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return;
        }
    };

    match state.analyzer.write() {
        Ok(mut guard) => {
            *guard = Arc::new(analyzer);
            info!("Analyzer re-initialized with new config");
        }
        Err(e) => error!("Analyzer lock poisoned: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn state_with_root(root: &std::path::Path) -> BackendState {
        let state = BackendState::new();
        *state.workspace_root.write().unwrap() = Some(root.to_path_buf());
        state
    }

    #[test]
    fn test_reload_picks_up_tool() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".lintbridge.json"),
            r#"{ "tool": { "program": "verilator", "args": ["--lint-only"] } }"#,
        )
        .unwrap();

        let state = state_with_root(dir.path());
        reload_config(&state);

        let analyzer = state.analyzer.read().unwrap().clone();
        assert_eq!(analyzer.tool.program, "verilator");
        assert_eq!(analyzer.tool.args, vec!["--lint-only"]);
    }

    #[test]
    fn test_invalid_config_keeps_previous_analyzer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".lintbridge.json"), r#"{ "bogus": 1 }"#).unwrap();

        let state = state_with_root(dir.path());
        reload_config(&state);

        let analyzer = state.analyzer.read().unwrap().clone();
        assert_eq!(analyzer.tool.program, "verible-verilog-lint");
    }

    #[test]
    fn test_no_workspace_root_is_noop() {
        let state = BackendState::new();
        reload_config(&state);

        let analyzer = state.analyzer.read().unwrap().clone();
        assert_eq!(analyzer.tool.program, "verible-verilog-lint");
    }
}
