//! Output formatting module

mod json;
mod text;

use miette::Result;

use lintbridge_core::DiagnosticCollection;

use crate::cli::OutputFormat;

/// Prints the collection and returns true if it holds any error.
pub fn output_collection(
    collection: &DiagnosticCollection,
    checked: usize,
    format: OutputFormat,
) -> Result<bool> {
    match format {
        OutputFormat::Json => json::output_json(collection)?,
        OutputFormat::Text => text::output_text(collection, checked),
    }

    Ok(collection.has_errors())
}
