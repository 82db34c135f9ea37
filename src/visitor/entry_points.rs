//! Entry-point detection: web-framework route decorators and the
//! `if __name__ == "__main__":` guard (§4.1).
//!
//! Ported from `cytoscnpy::entry_point::is_main_guard` and
//! `cytoscnpy::framework`'s decorator matching, simplified to the fixed
//! decorator name/attribute lists in [`crate::constants`].

use crate::constants::{ENTRY_DECORATOR_ATTRS, ENTRY_DECORATOR_NAMES};
use ruff_python_ast::{self as ast, Expr, Stmt};

/// The synthetic entry-point name recorded for a module's `__main__` guard.
pub const MAIN_GUARD_NAME: &str = "__main__";

/// Returns `true` if `decorator_list` contains a route-style decorator, per
/// the three matching rules in §4.1:
/// - a bare name in [`ENTRY_DECORATOR_NAMES`] (`app`, `route`)
/// - an attribute access whose final segment is in [`ENTRY_DECORATOR_ATTRS`]
/// - a call whose callee is such an attribute access
#[must_use]
pub fn has_entry_decorator(decorator_list: &[ast::Decorator]) -> bool {
    decorator_list
        .iter()
        .any(|d| is_entry_decorator_expr(&d.expression))
}

fn is_entry_decorator_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Name(name) => ENTRY_DECORATOR_NAMES.contains(&name.id.as_str()),
        Expr::Attribute(attr) => ENTRY_DECORATOR_ATTRS.contains(&attr.attr.as_str()),
        Expr::Call(call) => is_entry_decorator_expr(&call.func),
        _ => false,
    }
}

/// Scans a module body for a top-level `if __name__ == "__main__":` (or
/// its reversed comparison) guard.
#[must_use]
pub fn has_main_guard(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| {
        matches!(stmt, Stmt::If(node) if is_main_guard_test(&node.test))
    })
}

fn is_main_guard_test(test: &Expr) -> bool {
    let Expr::Compare(cmp) = test else {
        return false;
    };
    if cmp.ops.first() != Some(&ast::CmpOp::Eq) {
        return false;
    }
    let Some(rhs) = cmp.comparators.first() else {
        return false;
    };
    (is_dunder_name(&cmp.left) && is_main_string(rhs))
        || (is_main_string(&cmp.left) && is_dunder_name(rhs))
}

fn is_dunder_name(expr: &Expr) -> bool {
    matches!(expr, Expr::Name(name) if name.id.as_str() == "__name__")
}

fn is_main_string(expr: &Expr) -> bool {
    matches!(expr, Expr::StringLiteral(lit) if lit.value.to_str() == "__main__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn function_decorators(source: &str) -> Vec<ast::Decorator> {
        let module = parse_source(source).expect("valid source");
        let Stmt::FunctionDef(f) = &module.body[0] else {
            panic!("expected a function def");
        };
        f.decorator_list.clone()
    }

    #[test]
    fn bare_app_decorator_is_an_entry_point() {
        let decorators = function_decorators("@app\ndef handler():\n    pass\n");
        assert!(has_entry_decorator(&decorators));
    }

    #[test]
    fn route_attribute_call_is_an_entry_point() {
        let decorators = function_decorators("@app.get(\"/x\")\ndef handler():\n    pass\n");
        assert!(has_entry_decorator(&decorators));
    }

    #[test]
    fn unrelated_decorator_is_not_an_entry_point() {
        let decorators = function_decorators("@staticmethod\ndef handler():\n    pass\n");
        assert!(!has_entry_decorator(&decorators));
    }

    #[test]
    fn detects_main_guard_in_either_comparison_order() {
        let module = parse_source("if __name__ == \"__main__\":\n    run()\n").unwrap();
        assert!(has_main_guard(&module.body));

        let reversed = parse_source("if \"__main__\" == __name__:\n    run()\n").unwrap();
        assert!(has_main_guard(&reversed.body));
    }

    #[test]
    fn no_main_guard_when_absent() {
        let module = parse_source("def run():\n    pass\n").unwrap();
        assert!(!has_main_guard(&module.body));
    }
}
