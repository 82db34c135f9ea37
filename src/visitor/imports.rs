//! Import-statement extraction: `import a.b` and `from .a import b as c`
//! (§4.1). Extraction walks the whole module body, not just top-level
//! statements, since deferred imports inside functions still constitute
//! real dependency edges.

use ruff_python_ast::{self as ast, Stmt};

/// One name imported by a `from ... import ...` statement.
#[derive(Debug, Clone)]
pub struct ImportedName {
    pub name: String,
    pub alias: Option<String>,
}

/// A single import statement as written in the source.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    /// Dotted module path as written, without leading dots.
    /// Empty for a bare `from . import x`.
    pub module: String,
    /// Number of leading dots; 0 for an absolute import.
    pub level: u32,
    /// Names imported from `module`; empty for a bare `import module`.
    pub names: Vec<ImportedName>,
    /// `true` for `from module import *`.
    pub is_wildcard: bool,
    /// The local name a bare `import module[.sub][ as alias]` binds
    /// (`alias`, or else `module`'s first segment). `None` for
    /// `from ... import ...` statements, which bind `names` instead.
    pub bound_name: Option<String>,
}

/// Walks `body` recursively and collects every import statement.
#[must_use]
pub fn collect_imports(body: &[Stmt]) -> Vec<ImportRecord> {
    let mut out = Vec::new();
    walk_body(body, &mut out);
    out
}

fn walk_body(body: &[Stmt], out: &mut Vec<ImportRecord>) {
    for stmt in body {
        walk_stmt(stmt, out);
    }
}

fn walk_stmt(stmt: &Stmt, out: &mut Vec<ImportRecord>) {
    match stmt {
        Stmt::Import(node) => {
            for alias in &node.names {
                let module = alias.name.to_string();
                let bound_name = alias.asname.as_ref().map(ToString::to_string).or_else(|| {
                    module.split('.').next().map(std::string::ToString::to_string)
                });
                out.push(ImportRecord {
                    module,
                    level: 0,
                    names: Vec::new(),
                    is_wildcard: false,
                    bound_name,
                });
            }
        }
        Stmt::ImportFrom(node) => {
            let module = node
                .module
                .as_ref()
                .map(std::string::ToString::to_string)
                .unwrap_or_default();
            let level = node.level;
            let is_wildcard = node.names.len() == 1 && node.names[0].name.as_str() == "*";
            let names = if is_wildcard {
                Vec::new()
            } else {
                node.names
                    .iter()
                    .map(|alias| ImportedName {
                        name: alias.name.to_string(),
                        alias: alias.asname.as_ref().map(|n| n.to_string()),
                    })
                    .collect()
            };
            out.push(ImportRecord {
                module,
                level,
                names,
                is_wildcard,
                bound_name: None,
            });
        }
        Stmt::FunctionDef(node) => walk_body(&node.body, out),
        Stmt::ClassDef(node) => walk_body(&node.body, out),
        Stmt::If(node) => {
            walk_body(&node.body, out);
            for clause in &node.elif_else_clauses {
                walk_body(&clause.body, out);
            }
        }
        Stmt::For(node) => {
            walk_body(&node.body, out);
            walk_body(&node.orelse, out);
        }
        Stmt::While(node) => {
            walk_body(&node.body, out);
            walk_body(&node.orelse, out);
        }
        Stmt::With(node) => walk_body(&node.body, out),
        Stmt::Try(node) => {
            walk_body(&node.body, out);
            for handler in &node.handlers {
                let ast::ExceptHandler::ExceptHandler(h) = handler;
                walk_body(&h.body, out);
            }
            walk_body(&node.orelse, out);
            walk_body(&node.finalbody, out);
        }
        Stmt::Match(node) => {
            for case in &node.cases {
                walk_body(&case.body, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::collect_imports;
    use crate::parser::parse_source;

    #[test]
    fn plain_import_binds_its_first_segment() {
        let module = parse_source("import os.path\n").unwrap();
        let imports = collect_imports(&module.body);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].module, "os.path");
        assert_eq!(imports[0].bound_name.as_deref(), Some("os"));
    }

    #[test]
    fn aliased_import_binds_the_alias() {
        let module = parse_source("import numpy as np\n").unwrap();
        let imports = collect_imports(&module.body);
        assert_eq!(imports[0].bound_name.as_deref(), Some("np"));
    }

    #[test]
    fn from_import_records_level_and_names() {
        let module = parse_source("from ..pkg import thing as alias\n").unwrap();
        let imports = collect_imports(&module.body);
        assert_eq!(imports[0].module, "pkg");
        assert_eq!(imports[0].level, 2);
        assert_eq!(imports[0].names[0].name, "thing");
        assert_eq!(imports[0].names[0].alias.as_deref(), Some("alias"));
    }

    #[test]
    fn wildcard_import_is_flagged_with_no_names() {
        let module = parse_source("from pkg import *\n").unwrap();
        let imports = collect_imports(&module.body);
        assert!(imports[0].is_wildcard);
        assert!(imports[0].names.is_empty());
    }

    #[test]
    fn imports_nested_inside_functions_are_still_collected() {
        let module = parse_source("def f():\n    import json\n").unwrap();
        let imports = collect_imports(&module.body);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].module, "json");
    }
}
