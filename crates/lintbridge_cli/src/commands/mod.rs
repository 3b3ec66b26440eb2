//! Subcommand implementations

mod init;
mod lint;
mod lsp;
mod parse;

pub use init::run_init;
pub use lint::run_lint;
pub use lsp::run_lsp;
pub use parse::run_parse;
