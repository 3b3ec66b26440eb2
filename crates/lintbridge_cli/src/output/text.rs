//! Text output formatter

use lintbridge_core::{DiagnosticCollection, DiagnosticRecord};

pub fn output_text(collection: &DiagnosticCollection, checked: usize) {
    for (path, records) in collection.iter() {
        if records.is_empty() {
            continue;
        }

        println!("\n{}:", path);
        for record in records {
            println!("  {}", format_record(record));
        }
    }

    println!();
    println!(
        "Checked {} files, found {} issues",
        checked,
        collection.record_count()
    );
}

/// Formats one record with 1-based positions, the way compilers print them.
fn format_record(record: &DiagnosticRecord) -> String {
    format!(
        "{}:{} {}: {}",
        u64::from(record.line) + 1,
        u64::from(record.column) + 1,
        record.severity.as_str(),
        record.message.trim()
    )
}
