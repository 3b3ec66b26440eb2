//! CLI utility functions

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use lintbridge_core::Config;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the explicit config, else one discovered in the current directory,
/// else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path).map_err(|e| miette::miette!("{}", e));
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match Config::discover(&cwd) {
        Some(path) => {
            info!("Using config {}", path.display());
            Config::from_file(&path).map_err(|e| miette::miette!("{}", e))
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
