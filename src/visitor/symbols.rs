//! Top-level symbol extraction: class and function definitions with their
//! docstring, line number, complexity, and call targets (§4.1).

use crate::model::{Block, Symbol, SymbolKind};
use crate::utils::LineIndex;
use crate::visitor::calls::collect_calls;
use crate::visitor::entry_points::has_entry_decorator;
use ruff_python_ast::Stmt;

/// Extracts every top-level class/function definition from `body`.
///
/// `blocks` supplies the complexity score for each name, as computed by
/// the configured metric provider; a name absent from `blocks` gets a
/// complexity of 0 (§7 `MissingMetric`).
#[must_use]
pub fn extract_symbols(body: &[Stmt], blocks: &[Block], lines: &LineIndex) -> Vec<Symbol> {
    let mut out = Vec::new();
    for stmt in body {
        match stmt {
            Stmt::FunctionDef(node) => {
                let name = node.name.to_string();
                let complexity = blocks
                    .iter()
                    .find(|b| b.name == name)
                    .map_or(0, |b| b.complexity);
                out.push(Symbol {
                    name: name.clone(),
                    kind: SymbolKind::Function,
                    doc: docstring_or_default(&node.body, "Function", &name),
                    line: lines.line_index(node.range.start()),
                    complexity,
                    calls: collect_calls(&node.body),
                    called_by: Vec::new(),
                    is_entry_point: has_entry_decorator(&node.decorator_list),
                });
            }
            Stmt::ClassDef(node) => {
                let name = node.name.to_string();
                let complexity = blocks
                    .iter()
                    .find(|b| b.name == name)
                    .map_or(0, |b| b.complexity);
                out.push(Symbol {
                    name: name.clone(),
                    kind: SymbolKind::Class,
                    doc: docstring_or_default(&node.body, "Class", &name),
                    line: lines.line_index(node.range.start()),
                    complexity,
                    calls: collect_calls(&node.body),
                    called_by: Vec::new(),
                    is_entry_point: false,
                });
            }
            _ => {}
        }
    }
    out
}

/// Returns the first line of a docstring if `body` opens with one, else a
/// synthesized `"<kind> <name>"` placeholder.
fn docstring_or_default(body: &[Stmt], kind: &str, name: &str) -> String {
    if let Some(Stmt::Expr(expr)) = body.first() {
        if let ruff_python_ast::Expr::StringLiteral(lit) = expr.value.as_ref() {
            let text = lit.value.to_str();
            if let Some(first_line) = text.lines().find(|l| !l.trim().is_empty()) {
                return first_line.trim().to_string();
            }
        }
    }
    format!("{kind} {name}")
}
