//! Shared data model for the analyzer pipeline.
//!
//! Mirrors the data model section of the specification: a dotted
//! [`ModuleId`], per-symbol metadata, import records, and the
//! aggregate [`ComplexityMetrics`] a metric provider hands back per
//! source file.

use serde::Serialize;
use std::collections::BTreeMap;

/// A dotted identifier derived from a file's path relative to a detected
/// project root (e.g. `a.b.c`, or `a.b` for an `a/b/__init__.py`).
///
/// Kept as a plain `String` rather than an interned/arena type: the runs
/// this crate targets are bounded at tens of thousands of files, not a
/// scale where FQN interning pays for itself.
pub type ModuleId = String;

/// Kind of a top-level definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Function,
}

/// A top-level class or function definition within a module.
#[derive(Debug, Clone, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// First-line docstring, or a synthesized `"Class X"` / `"Function X"`.
    pub doc: String,
    /// 1-indexed source line.
    pub line: usize,
    /// Cyclomatic complexity from the metric provider; 0 if unknown.
    pub complexity: usize,
    /// Bare-name call targets found in this symbol's body.
    pub calls: Vec<String>,
    /// Inverse of `calls`, populated by the graph assembler.
    pub called_by: Vec<String>,
    pub is_entry_point: bool,
}

/// Aggregate complexity/maintainability numbers for one source file.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexityMetrics {
    pub max: usize,
    /// Rounded to one decimal place.
    pub average: f64,
    /// Rounded to one decimal place; defaults to 100.0 when undefined.
    pub maintainability_index: f64,
    pub total_blocks: usize,
    /// Number of blocks whose complexity exceeds 10.
    pub high_complexity_blocks: usize,
}

impl Default for ComplexityMetrics {
    fn default() -> Self {
        Self {
            max: 0,
            average: 0.0,
            maintainability_index: 100.0,
            total_blocks: 0,
            high_complexity_blocks: 0,
        }
    }
}

/// A single measured block handed back by a metric provider: a function,
/// method, or class body with its own complexity score.
#[derive(Debug, Clone)]
pub struct Block {
    pub name: String,
    pub complexity: usize,
    /// Enclosing class name, if this block is a method.
    pub enclosing_class: Option<String>,
}

/// Kind of node emitted into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Module,
    Class,
    Function,
    External,
}

/// Kind of edge emitted into the graph.
///
/// Variant declaration order doubles as the derived `Ord` key, and edges
/// are reduced through a `BTreeSet<(String, String, EdgeKind)>` (§3
/// "lexicographic over the triple"), so this order must match the
/// lexicographic order of the serialized names: `calls` < `defines` <
/// `external` < `imports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Calls,
    Defines,
    External,
    Imports,
}

/// A node in the final artifact: a module, a symbol, or a folded external package.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    /// Semantic type tag (metadata-derived, or `"external"`).
    #[serde(rename = "type")]
    pub node_type: String,
    pub title: String,
    /// Originating source path; absent for external nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub role: String,
    /// Top-level dotted segment of `id`, or `"external"` for external nodes.
    pub project: String,
    pub stats: BTreeMap<String, String>,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// An edge in the final artifact.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeKind,
}

/// Secondary per-module record exposed alongside the graph.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleDetails {
    pub path: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub role: String,
    pub imports: Vec<String>,
    pub symbol_count: usize,
    pub stats: BTreeMap<String, String>,
    pub functions: Vec<Symbol>,
    pub entry_points: Vec<String>,
    pub call_graph: BTreeMap<String, Vec<String>>,
    pub dead_functions: Vec<String>,
}
