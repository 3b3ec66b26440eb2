//! Parse command implementation

use std::io::Read;
use std::path::Path;

use miette::{IntoDiagnostic, Result};

use lintbridge_core::{
    Config, DiagnosticCollection, DiagnosticPipeline, SourceDocument, ToolOutput,
};

use crate::cli::OutputFormat;
use crate::output::output_collection;

/// Structures captured tool output for one document.
///
/// Returns true if any error-level diagnostic was found.
pub fn run_parse(
    config: &Config,
    document_path: &str,
    input: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path).into_diagnostic()?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .into_diagnostic()?;
            buffer
        }
    };

    let pipeline = DiagnosticPipeline::from_config(config).map_err(|e| miette::miette!("{}", e))?;
    let mut collection = DiagnosticCollection::new();
    let document = SourceDocument::new(document_path);

    pipeline.run(
        &ToolOutput::from_stdout(text),
        Some(&document),
        document_path,
        &mut collection,
    );

    output_collection(&collection, 1, format)
}
