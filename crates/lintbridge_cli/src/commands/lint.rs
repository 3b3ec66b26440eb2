//! Lint command implementation

use std::path::PathBuf;

use miette::Result;
use tracing::{debug, warn};

use lintbridge_core::{Config, DiagnosticCollection, DiagnosticPipeline, SourceDocument};

use crate::cli::OutputFormat;
use crate::output::output_collection;

/// Runs the tool on every file and prints the merged diagnostics.
///
/// Returns true if any error-level diagnostic was found.
pub fn run_lint(config: &Config, files: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let pipeline = DiagnosticPipeline::from_config(config).map_err(|e| miette::miette!("{}", e))?;
    let mut collection = DiagnosticCollection::new();
    let mut checked = 0usize;

    for file in files {
        if !file.is_file() {
            warn!("Skipping {}: not a file", file.display());
            continue;
        }

        let output = config
            .tool
            .run(file)
            .map_err(|e| miette::miette!("{}", e))?;
        if let Some(status) = &output.error {
            debug!("{}", status);
        }
        checked += 1;

        let document_path = file.display().to_string();
        let document = SourceDocument::new(&document_path);
        pipeline.run(&output, Some(&document), &document_path, &mut collection);
    }

    output_collection(&collection, checked, format)
}
