//! Call-target extraction, ported from
//! `cytoscnpy::entry_point::{collect_function_calls, collect_calls_from_expr,
//! get_call_name}`.
//!
//! Two call sites use this, and they need different extraction rules
//! (§4.1): module-level statements capture the bare *receiver* name
//! (`np.array(...)` yields `np`, so it can be correlated against an
//! import's bound name), while individual function bodies capture the
//! final attribute segment instead (`obj.method()` yields `method`, for
//! the intra-module caller/callee graph).

use ruff_python_ast::{self as ast, Expr, Stmt};

type TargetFn = fn(&Expr) -> Option<String>;

/// Collects every name a `Call` expression invokes within a function
/// body: the bare name for `foo()`, or the final attribute segment for
/// `obj.method()`.
#[must_use]
pub fn collect_calls(body: &[Stmt]) -> Vec<String> {
    collect(body, call_target_name)
}

/// Collects every name a `Call` expression invokes at module scope: the
/// bare name for `foo()`, or the receiver's own bare name for
/// `obj.method()` (walking down through chained attribute access to the
/// underlying `Name`), so an import's bound name can be correlated
/// against it for call-promotion (§4.3).
#[must_use]
pub fn collect_module_calls(body: &[Stmt]) -> Vec<String> {
    collect(body, module_call_target_name)
}

fn collect(body: &[Stmt], target_fn: TargetFn) -> Vec<String> {
    let mut out = Vec::new();
    for stmt in body {
        visit_stmt(stmt, target_fn, &mut out);
    }
    out
}

fn visit_stmt(stmt: &Stmt, target_fn: TargetFn, out: &mut Vec<String>) {
    match stmt {
        Stmt::Expr(node) => visit_expr(&node.value, target_fn, out),
        Stmt::Assign(node) => visit_expr(&node.value, target_fn, out),
        Stmt::AugAssign(node) => visit_expr(&node.value, target_fn, out),
        Stmt::AnnAssign(node) => {
            if let Some(value) = &node.value {
                visit_expr(value, target_fn, out);
            }
        }
        Stmt::Return(node) => {
            if let Some(value) = &node.value {
                visit_expr(value, target_fn, out);
            }
        }
        Stmt::If(node) => {
            visit_expr(&node.test, target_fn, out);
            for s in &node.body {
                visit_stmt(s, target_fn, out);
            }
            for clause in &node.elif_else_clauses {
                if let Some(test) = &clause.test {
                    visit_expr(test, target_fn, out);
                }
                for s in &clause.body {
                    visit_stmt(s, target_fn, out);
                }
            }
        }
        Stmt::For(node) => {
            visit_expr(&node.iter, target_fn, out);
            for s in &node.body {
                visit_stmt(s, target_fn, out);
            }
            for s in &node.orelse {
                visit_stmt(s, target_fn, out);
            }
        }
        Stmt::While(node) => {
            visit_expr(&node.test, target_fn, out);
            for s in &node.body {
                visit_stmt(s, target_fn, out);
            }
            for s in &node.orelse {
                visit_stmt(s, target_fn, out);
            }
        }
        Stmt::With(node) => {
            for item in &node.items {
                visit_expr(&item.context_expr, target_fn, out);
            }
            for s in &node.body {
                visit_stmt(s, target_fn, out);
            }
        }
        Stmt::Try(node) => {
            for s in &node.body {
                visit_stmt(s, target_fn, out);
            }
            for handler in &node.handlers {
                let ast::ExceptHandler::ExceptHandler(h) = handler;
                for s in &h.body {
                    visit_stmt(s, target_fn, out);
                }
            }
            for s in &node.orelse {
                visit_stmt(s, target_fn, out);
            }
            for s in &node.finalbody {
                visit_stmt(s, target_fn, out);
            }
        }
        Stmt::Match(node) => {
            visit_expr(&node.subject, target_fn, out);
            for case in &node.cases {
                for s in &case.body {
                    visit_stmt(s, target_fn, out);
                }
            }
        }
        Stmt::Assert(node) => visit_expr(&node.test, target_fn, out),
        Stmt::Raise(node) => {
            if let Some(exc) = &node.exc {
                visit_expr(exc, target_fn, out);
            }
        }
        Stmt::Delete(node) => {
            for t in &node.targets {
                visit_expr(t, target_fn, out);
            }
        }
        // Nested defs are their own blocks; do not climb into them here.
        Stmt::FunctionDef(_) | Stmt::ClassDef(_) => {}
        _ => {}
    }
}

fn visit_expr(expr: &Expr, target_fn: TargetFn, out: &mut Vec<String>) {
    match expr {
        Expr::Call(call) => {
            if let Some(name) = target_fn(&call.func) {
                out.push(name);
            }
            visit_expr(&call.func, target_fn, out);
            for arg in &call.arguments.args {
                visit_expr(arg, target_fn, out);
            }
            for kw in &call.arguments.keywords {
                visit_expr(&kw.value, target_fn, out);
            }
        }
        Expr::BoolOp(node) => {
            for v in &node.values {
                visit_expr(v, target_fn, out);
            }
        }
        Expr::BinOp(node) => {
            visit_expr(&node.left, target_fn, out);
            visit_expr(&node.right, target_fn, out);
        }
        Expr::UnaryOp(node) => visit_expr(&node.operand, target_fn, out),
        Expr::If(node) => {
            visit_expr(&node.test, target_fn, out);
            visit_expr(&node.body, target_fn, out);
            visit_expr(&node.orelse, target_fn, out);
        }
        Expr::Attribute(node) => visit_expr(&node.value, target_fn, out),
        Expr::Subscript(node) => {
            visit_expr(&node.value, target_fn, out);
            visit_expr(&node.slice, target_fn, out);
        }
        Expr::Tuple(node) => {
            for e in &node.elts {
                visit_expr(e, target_fn, out);
            }
        }
        Expr::List(node) => {
            for e in &node.elts {
                visit_expr(e, target_fn, out);
            }
        }
        Expr::Await(node) => visit_expr(&node.value, target_fn, out),
        Expr::Compare(node) => {
            visit_expr(&node.left, target_fn, out);
            for c in &node.comparators {
                visit_expr(c, target_fn, out);
            }
        }
        _ => {}
    }
}

/// Resolves the display name of a call's callee: the bare name for
/// `foo()`, or the final attribute segment for `obj.method()`.
fn call_target_name(func: &Expr) -> Option<String> {
    match func {
        Expr::Name(name) => Some(name.id.to_string()),
        Expr::Attribute(attr) => Some(attr.attr.to_string()),
        _ => None,
    }
}

/// Resolves the display name of a module-level call's callee: the bare
/// name for `foo()`, or the underlying receiver's bare name for
/// `obj.method()` / `obj.sub.method()` — walking down through chained
/// attribute access rather than stopping at the final segment.
fn module_call_target_name(func: &Expr) -> Option<String> {
    match func {
        Expr::Name(name) => Some(name.id.to_string()),
        Expr::Attribute(attr) => module_call_target_name(&attr.value),
        _ => None,
    }
}
