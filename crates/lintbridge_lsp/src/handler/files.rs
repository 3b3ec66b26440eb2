//! Watched files handler.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use lintbridge_core::Config;

use crate::config::reload_config;
use crate::state::BackendState;

/// Returns true if any change touches a LintBridge config file.
pub(crate) fn is_config_change(params: &DidChangeWatchedFilesParams) -> bool {
    params.changes.iter().any(|change| {
        let path = change.uri.path();
        Config::CONFIG_FILES.iter().any(|name| path.ends_with(name))
    })
}

/// Handles the `workspace/didChangeWatchedFiles` notification.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) {
    debug!("Watched files changed: {:?}", params.changes);

    if is_config_change(&params) {
        info!("Configuration file changed, reloading...");
        reload_config(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(uri: &str) -> DidChangeWatchedFilesParams {
        DidChangeWatchedFilesParams {
            changes: vec![FileEvent::new(Url::parse(uri).unwrap(), FileChangeType::CHANGED)],
        }
    }

    #[test]
    fn test_config_change_detection() {
        assert!(is_config_change(&params("file:///ws/.lintbridge.json")));
        assert!(is_config_change(&params("file:///ws/.lintbridge.jsonc")));
        assert!(!is_config_change(&params("file:///ws/top.sv")));
    }
}
