//! AST visitors (§4.1): turns one parsed module into symbols, imports,
//! module-level call receivers, entry-point markers, and metadata tags.

pub mod calls;
pub mod entry_points;
pub mod imports;
pub mod metadata;
pub mod symbols;

use crate::model::{Block, Symbol};
use crate::utils::LineIndex;
use entry_points::MAIN_GUARD_NAME;
use imports::ImportRecord;
use metadata::MetadataTag;
use ruff_python_ast::{Expr, ModModule, Stmt};

/// Everything the AST visitors extract from a single source file.
#[derive(Debug, Clone)]
pub struct VisitedModule {
    pub symbols: Vec<Symbol>,
    pub imports: Vec<ImportRecord>,
    /// Bare-name and attribute-receiver calls made directly at module
    /// scope (`foo()` and `foo.bar()` both yield `foo`).
    pub module_calls: Vec<String>,
    /// Decorator- and `__main__`-guard-derived entry-point names.
    pub entry_points: Vec<String>,
    pub metadata: Vec<MetadataTag>,
    /// First non-empty line of the module's own docstring, if any.
    pub docstring: Option<String>,
}

/// Runs every visitor over `module` and assembles their output.
///
/// `blocks` is the per-file output of the configured metric provider;
/// `source` backs both the metadata regex scan and the line index.
#[must_use]
pub fn visit_module(source: &str, module: &ModModule, blocks: &[Block]) -> VisitedModule {
    let lines = LineIndex::new(source);
    let symbols = symbols::extract_symbols(&module.body, blocks, &lines);

    let mut entry_points: Vec<String> = symbols
        .iter()
        .filter(|s| s.is_entry_point)
        .map(|s| s.name.clone())
        .collect();
    if entry_points::has_main_guard(&module.body) {
        entry_points.push(MAIN_GUARD_NAME.to_string());
    }

    VisitedModule {
        symbols,
        imports: imports::collect_imports(&module.body),
        module_calls: calls::collect_module_calls(&module.body),
        entry_points,
        metadata: metadata::scan_metadata(source),
        docstring: module_docstring(&module.body),
    }
}

/// Returns the first non-empty line of the module's own docstring, if the
/// module body opens with a bare string-literal expression.
fn module_docstring(body: &[Stmt]) -> Option<String> {
    let Some(Stmt::Expr(expr)) = body.first() else {
        return None;
    };
    let Expr::StringLiteral(lit) = expr.value.as_ref() else {
        return None;
    };
    let text = lit.value.to_str();
    text.lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string())
}
