//! LSP type conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use lintbridge_core::{DiagnosticRecord, Severity};

/// Source label attached to published diagnostics.
pub const SOURCE: &str = "lintbridge";

/// Converts a record to an LSP diagnostic.
///
/// The tool only reports a start position, so the range is empty.
pub fn to_lsp_diagnostic(record: &DiagnosticRecord) -> Diagnostic {
    let position = Position::new(record.line, record.column);

    let severity = match record.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: Range::new(position, position),
        severity: Some(severity),
        source: Some(SOURCE.to_string()),
        message: record.message.trim().to_string(),
        ..Default::default()
    }
}

/// Converts all records of one document.
pub fn to_lsp_diagnostics(records: &[DiagnosticRecord]) -> Vec<Diagnostic> {
    records.iter().map(to_lsp_diagnostic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record() {
        let record = DiagnosticRecord::new("/x/foo.sv", 1, 0, Severity::Error, " error: undeclared signal");
        let diag = to_lsp_diagnostic(&record);

        assert_eq!(diag.range, Range::new(Position::new(1, 0), Position::new(1, 0)));
        assert_eq!(diag.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diag.source.as_deref(), Some("lintbridge"));
        assert_eq!(diag.message, "error: undeclared signal");
    }

    #[test]
    fn test_warning_record() {
        let record = DiagnosticRecord::new("/x/foo.sv", 4, 2, Severity::Warning, "unused variable");
        let diag = to_lsp_diagnostic(&record);

        assert_eq!(diag.range.start, Position::new(4, 2));
        assert_eq!(diag.severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn test_order_is_preserved() {
        let records = vec![
            DiagnosticRecord::new("a.sv", 5, 0, Severity::Warning, "second line first"),
            DiagnosticRecord::new("a.sv", 1, 0, Severity::Warning, "first line second"),
        ];
        let diags = to_lsp_diagnostics(&records);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].range.start.line, 5);
        assert_eq!(diags[1].range.start.line, 1);
    }
}
