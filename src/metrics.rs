//! The pluggable complexity/maintainability metric provider interface
//! (§6 "Metric provider").
//!
//! The core only depends on the [`MetricProvider`] trait; the spec
//! treats the actual scoring engine as an external collaborator. Two
//! adapters ship here: [`NullMetricProvider`] (the spec's "null
//! implementation") and [`BasicMetricProvider`], a reference adapter
//! ported from `cytoscnpy::complexity`/`cytoscnpy::metrics` that computes
//! real cyclomatic complexity but does not attempt full Halstead-based
//! maintainability scoring.

use crate::model::{Block, ComplexityMetrics};
use ruff_python_ast::{self as ast, Expr, Stmt};

/// Computes complexity/maintainability metrics for one source file.
pub trait MetricProvider: Send + Sync {
    fn analyze(&self, source: &str) -> (ComplexityMetrics, Vec<Block>);
}

/// Returns default metrics and no blocks, per §7 `MissingMetric`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMetricProvider;

impl MetricProvider for NullMetricProvider {
    fn analyze(&self, _source: &str) -> (ComplexityMetrics, Vec<Block>) {
        (ComplexityMetrics::default(), Vec::new())
    }
}

/// Computes real cyclomatic complexity per top-level function/class, and
/// an approximate maintainability index that omits the Halstead-volume
/// term (treated as unavailable, matching [`mi_compute`]'s own defined
/// behavior for `volume <= 0.0`).
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicMetricProvider;

impl MetricProvider for BasicMetricProvider {
    fn analyze(&self, source: &str) -> (ComplexityMetrics, Vec<Block>) {
        let Ok(module) = crate::parser::parse_source(source) else {
            return (ComplexityMetrics::default(), Vec::new());
        };

        let mut visitor = BlockVisitor {
            blocks: Vec::new(),
            class_stack: Vec::new(),
        };
        visitor.visit_body(&module.body);
        let blocks = visitor.blocks;

        if blocks.is_empty() {
            return (ComplexityMetrics::default(), Vec::new());
        }

        let total: usize = blocks.iter().map(|b| b.complexity).sum();
        let max = blocks.iter().map(|b| b.complexity).max().unwrap_or(0);
        let average = (total as f64 / blocks.len() as f64 * 10.0).round() / 10.0;
        let high = blocks.iter().filter(|b| b.complexity > 10).count();
        let sloc = crate::utils::count_lines(source);
        let mi = (mi_compute(0.0, total, sloc, 0) * 10.0).round() / 10.0;

        let metrics = ComplexityMetrics {
            max,
            average,
            maintainability_index: mi,
            total_blocks: blocks.len(),
            high_complexity_blocks: high,
        };
        (metrics, blocks)
    }
}

/// Maintainability Index, ported from `cytoscnpy::metrics::mi_compute`.
///
/// `MI = 171 - 5.2*ln(V) - 0.23*G - 16.2*ln(LOC)`, clamped to `[0, 100]`.
/// The Halstead-volume term is skipped when `volume <= 0.0`.
#[must_use]
pub fn mi_compute(volume: f64, complexity: usize, sloc: usize, comments: usize) -> f64 {
    let mut mi = 171.0;
    if volume > 0.0 {
        mi -= 5.2 * volume.ln();
    }
    mi -= 0.23 * (complexity as f64);
    if sloc > 0 {
        mi -= 16.2 * (sloc as f64).ln();
    }
    if comments > 0 && sloc > 0 {
        let per_comment = comments as f64 / sloc as f64;
        mi += 50.0 * (2.4 * per_comment).sqrt().sin();
    }
    mi.clamp(0.0, 100.0)
}

struct BlockVisitor {
    blocks: Vec<Block>,
    class_stack: Vec<String>,
}

impl BlockVisitor {
    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(node) => {
                let complexity = block_complexity(&node.body);
                self.blocks.push(Block {
                    name: node.name.to_string(),
                    complexity,
                    enclosing_class: self.class_stack.last().cloned(),
                });
                self.visit_body(&node.body);
            }
            Stmt::ClassDef(node) => {
                let complexity = block_complexity(&node.body);
                self.blocks.push(Block {
                    name: node.name.to_string(),
                    complexity,
                    enclosing_class: None,
                });
                self.class_stack.push(node.name.to_string());
                self.visit_body(&node.body);
                self.class_stack.pop();
            }
            Stmt::If(node) => {
                self.visit_body(&node.body);
                for clause in &node.elif_else_clauses {
                    self.visit_body(&clause.body);
                }
            }
            Stmt::For(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::While(node) => {
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::With(node) => self.visit_body(&node.body),
            Stmt::Try(node) => {
                self.visit_body(&node.body);
                for handler in &node.handlers {
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    self.visit_body(&h.body);
                }
                self.visit_body(&node.orelse);
                self.visit_body(&node.finalbody);
            }
            Stmt::Match(node) => {
                for case in &node.cases {
                    self.visit_body(&case.body);
                }
            }
            _ => {}
        }
    }
}

/// Cyclomatic complexity of a single block body (function/class), ported
/// from `cytoscnpy::complexity::BlockComplexityVisitor`.
fn block_complexity(body: &[Stmt]) -> usize {
    let mut v = CcVisitor { complexity: 1 };
    v.visit_body(body);
    v.complexity
}

struct CcVisitor {
    complexity: usize,
}

impl CcVisitor {
    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::If(node) => {
                self.complexity += 1;
                self.visit_expr(&node.test);
                self.visit_body(&node.body);
                for clause in &node.elif_else_clauses {
                    if let Some(test) = &clause.test {
                        self.complexity += 1;
                        self.visit_expr(test);
                    }
                    self.visit_body(&clause.body);
                }
            }
            Stmt::For(node) => {
                self.complexity += 1;
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::While(node) => {
                self.complexity += 1;
                self.visit_expr(&node.test);
                self.visit_body(&node.body);
                self.visit_body(&node.orelse);
            }
            Stmt::Try(node) => {
                self.visit_body(&node.body);
                for handler in &node.handlers {
                    self.complexity += 1;
                    let ast::ExceptHandler::ExceptHandler(h) = handler;
                    self.visit_body(&h.body);
                }
                self.visit_body(&node.orelse);
                self.visit_body(&node.finalbody);
            }
            Stmt::With(node) => self.visit_body(&node.body),
            Stmt::Assert(node) => {
                self.complexity += 1;
                self.visit_expr(&node.test);
            }
            Stmt::Match(node) => {
                for case in &node.cases {
                    self.complexity += 1;
                    self.visit_body(&case.body);
                }
            }
            Stmt::Expr(node) => self.visit_expr(&node.value),
            Stmt::Return(node) => {
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Assign(node) => self.visit_expr(&node.value),
            _ => {}
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::BoolOp(node) => {
                if node.values.len() > 1 {
                    self.complexity += node.values.len() - 1;
                }
                for value in &node.values {
                    self.visit_expr(value);
                }
            }
            Expr::If(node) => {
                self.complexity += 1;
                self.visit_expr(&node.test);
                self.visit_expr(&node.body);
                self.visit_expr(&node.orelse);
            }
            Expr::ListComp(node) | Expr::SetComp(node) | Expr::Generator(node) => {
                self.complexity += node.generators.len();
                for gen in &node.generators {
                    self.complexity += gen.ifs.len();
                }
            }
            Expr::DictComp(node) => {
                self.complexity += node.generators.len();
                for gen in &node.generators {
                    self.complexity += gen.ifs.len();
                }
            }
            Expr::Call(node) => {
                self.visit_expr(&node.func);
                for arg in &node.arguments.args {
                    self.visit_expr(arg);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{mi_compute, BasicMetricProvider, MetricProvider};

    #[test]
    fn straight_line_function_has_complexity_one() {
        let (metrics, blocks) = BasicMetricProvider.analyze("def f():\n    return 1\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].complexity, 1);
        assert_eq!(metrics.max, 1);
    }

    #[test]
    fn branches_and_loops_each_add_one() {
        let source = "def f(x):\n    if x:\n        for i in x:\n            pass\n    return x\n";
        let (metrics, blocks) = BasicMetricProvider.analyze(source);
        assert_eq!(blocks[0].complexity, 3);
        assert_eq!(metrics.max, 3);
    }

    #[test]
    fn boolop_adds_one_less_than_its_operand_count() {
        let source = "def f(a, b, c):\n    return a and b and c\n";
        let (_, blocks) = BasicMetricProvider.analyze(source);
        assert_eq!(blocks[0].complexity, 1 + 2);
    }

    #[test]
    fn methods_record_their_enclosing_class() {
        let source = "class C:\n    def m(self):\n        pass\n";
        let (_, blocks) = BasicMetricProvider.analyze(source);
        let method = blocks.iter().find(|b| b.name == "m").unwrap();
        assert_eq!(method.enclosing_class.as_deref(), Some("C"));
    }

    #[test]
    fn unparseable_source_yields_default_metrics() {
        let (metrics, blocks) = BasicMetricProvider.analyze("def (((\n");
        assert!(blocks.is_empty());
        assert_eq!(metrics.maintainability_index, 100.0);
    }

    #[test]
    fn mi_compute_skips_the_volume_term_when_volume_is_zero() {
        let mi = mi_compute(0.0, 5, 20, 0);
        assert!(mi > 0.0 && mi <= 100.0);
    }
}
