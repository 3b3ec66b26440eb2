//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use lintbridge_core::DiagnosticCollection;

pub fn output_json(collection: &DiagnosticCollection) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(collection).into_diagnostic()?
    );
    Ok(())
}
