//! Thin wrapper around the Python AST parser.
//!
//! A parse failure is not a fatal condition for the pipeline (§7,
//! `UnparseableSource`) — callers are expected to keep the module with
//! zero symbols/imports/complexity and move on.

use ruff_python_ast::ModModule;

/// A source file that failed to parse.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse source: {0}")]
pub struct ParseFailure(String);

/// Parses `source` into a module AST, or a [`ParseFailure`] carrying the
/// underlying parser diagnostic.
pub fn parse_source(source: &str) -> Result<ModModule, ParseFailure> {
    ruff_python_parser::parse_module(source)
        .map(|parsed| parsed.into_syntax())
        .map_err(|err| ParseFailure(err.to_string()))
}
