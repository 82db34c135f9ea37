//! Graph assembly, ported from `cytoscnpy::analyzer::semantic::graph`'s
//! `SemanticGraph::{add_import, add_call, merge}` shape but built as a
//! single deterministic reduction instead of a shared `DashMap`/`RwLock`
//! graph, since the parallel stage (§5) produces per-file results that
//! are reduced in sorted order afterward.

use crate::config::SymbolLevel;
use crate::constants::is_stdlib;
use crate::model::{
    ComplexityMetrics, EdgeKind, GraphEdge, GraphNode, ModuleDetails, ModuleId, NodeKind,
    Symbol, SymbolKind,
};
use crate::resolver::{ImportResolver, Resolution, ResolverStats};
use crate::visitor::VisitedModule;
use std::collections::{BTreeMap, BTreeSet};

/// One module's raw visitor output, ready for assembly.
pub struct ModuleInput {
    pub id: ModuleId,
    pub path: String,
    pub lines: usize,
    pub visited: VisitedModule,
    pub metrics: ComplexityMetrics,
}

/// A fully assembled module: its graph node plus its detail record.
pub struct AssembledModule {
    pub node: GraphNode,
    pub details: ModuleDetails,
}

/// Everything [`assemble`] produces.
pub struct AssemblyOutput {
    pub modules: Vec<AssembledModule>,
    pub external_nodes: Vec<GraphNode>,
    /// One node per top-level class/function, emitted only when
    /// `symbol_level` is [`SymbolLevel::Symbol`] (§4.4).
    pub symbol_nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub resolver_stats: ResolverStats,
}

/// Assembles the final graph from every module's visitor output.
///
/// `inputs` need not be pre-sorted; this function sorts by module id
/// before doing anything else, which is what makes the whole pipeline's
/// output order-independent of file discovery order (§9 invariant 5).
/// `extra_stdlib` names a run's configured standard-library overrides.
/// `symbol_level` controls whether a `Class`/`Function` node and
/// `defines` edge is emitted for every top-level symbol (§4.4); at the
/// default `Module` level only module nodes are produced.
#[must_use]
pub fn assemble(
    mut inputs: Vec<ModuleInput>,
    extra_stdlib: &[String],
    symbol_level: SymbolLevel,
) -> AssemblyOutput {
    inputs.sort_by(|a, b| a.id.cmp(&b.id));

    let module_ids: Vec<ModuleId> = inputs.iter().map(|m| m.id.clone()).collect();
    let mut resolver = ImportResolver::with_extra_stdlib(&module_ids, extra_stdlib);

    let mut edges: BTreeSet<(String, String, EdgeKind)> = BTreeSet::new();
    let mut external_ids: BTreeSet<String> = BTreeSet::new();
    let mut modules = Vec::with_capacity(inputs.len());
    let mut symbol_nodes = Vec::new();

    for input in &inputs {
        let mut raw_imports = Vec::new();

        for record in &input.visited.imports {
            let display = if record.level > 0 {
                format!("{}{}", ".".repeat(record.level as usize), record.module)
            } else {
                record.module.clone()
            };
            raw_imports.push(display.clone());

            // A bare `from . import a, b` has no dotted module component;
            // each imported name may itself be a sibling submodule, so
            // each is resolved independently rather than as one target.
            // Per §4.3, a failed resolution here never folds into an
            // external node: a dots-only import can never name a
            // third-party package.
            if record.level > 0 && record.module.is_empty() && !record.is_wildcard {
                for name in &record.names {
                    let resolution =
                        resolver.resolve_relative(&input.id, record.level, Some(&name.name));
                    let _ = fold_resolution(
                        &mut edges,
                        &mut external_ids,
                        &input.id,
                        &resolution,
                        &name.name,
                        false,
                    );
                }
                continue;
            }

            let base = (!record.module.is_empty()).then_some(record.module.as_str());
            let resolution = if record.level > 0 {
                resolver.resolve_relative(&input.id, record.level, base)
            } else {
                resolver.resolve_absolute(&record.module)
            };

            let target = fold_resolution(
                &mut edges,
                &mut external_ids,
                &input.id,
                &resolution,
                &display,
                true,
            );

            // §4.1 call-promotion applies to both first-party modules and
            // folded external packages: a bare receiver call on either
            // bound name upgrades the `imports`/`external` edge with an
            // additional `calls` edge to the same target.
            if let (Some(target), Some(bound)) = (&target, &record.bound_name) {
                if input.visited.module_calls.contains(bound) {
                    edges.insert((input.id.clone(), target.clone(), EdgeKind::Calls));
                }
            }
        }

        let symbols = invert_called_by(input.visited.symbols.clone());
        let call_graph = build_call_graph(&symbols);
        let dead_functions = find_dead_functions(&symbols);

        let stats = module_stats(input.lines, raw_imports.len(), &symbols, &input.metrics);
        let (node_type, title, role) = node_identity(&input.visited, &input.id);

        if symbol_level == SymbolLevel::Symbol {
            for symbol in &symbols {
                symbol_nodes.push(symbol_node(&input.id, &input.path, symbol));
                edges.insert((
                    input.id.clone(),
                    format!("{}.{}", input.id, symbol.name),
                    EdgeKind::Defines,
                ));
            }
        }

        let node = GraphNode {
            id: input.id.clone(),
            kind: NodeKind::Module,
            node_type: node_type.clone(),
            title,
            path: Some(input.path.clone()),
            role: role.clone(),
            project: top_level_segment(&input.id),
            stats: stats.clone(),
            x: 0.0,
            y: 0.0,
            parent: None,
        };

        let details = ModuleDetails {
            path: input.path.clone(),
            module_type: node_type,
            role,
            imports: raw_imports,
            symbol_count: symbols.len(),
            stats,
            functions: symbols,
            entry_points: input.visited.entry_points.clone(),
            call_graph,
            dead_functions,
        };

        modules.push(AssembledModule { node, details });
    }

    let external_nodes = external_ids
        .iter()
        .map(|id| {
            let mut stats = BTreeMap::new();
            stats.insert("Type".to_string(), "External Package".to_string());
            GraphNode {
                id: id.clone(),
                kind: NodeKind::External,
                node_type: "External Package".to_string(),
                title: id.clone(),
                path: None,
                role: "external".to_string(),
                project: "external".to_string(),
                stats,
                x: 0.0,
                y: 0.0,
                parent: None,
            }
        })
        .collect();

    let edges = edges
        .into_iter()
        .map(|(from, to, edge_type)| GraphEdge { from, to, edge_type })
        .collect();

    AssemblyOutput {
        modules,
        external_nodes,
        symbol_nodes,
        edges,
        resolver_stats: resolver.stats().clone(),
    }
}

/// Turns one resolved import into an `imports` edge, or folds it into an
/// external-package node when unresolved and `fold_failed_as_external`.
///
/// Returns the target id the edge was recorded against — the resolved
/// module id, or the folded external package id — so the caller can
/// promote the same target to a `calls` edge (§4.1); `None` when the
/// import resolved to the stdlib, to itself, or failed without folding.
fn fold_resolution(
    edges: &mut BTreeSet<(String, String, EdgeKind)>,
    external_ids: &mut BTreeSet<String>,
    current: &str,
    resolution: &Resolution,
    fallback_top: &str,
    fold_failed_as_external: bool,
) -> Option<String> {
    if resolution.is_stdlib {
        return None;
    }
    if let Some(target) = &resolution.module {
        if target != current {
            edges.insert((current.to_string(), target.clone(), EdgeKind::Imports));
            return Some(target.clone());
        }
        return None;
    }
    if fold_failed_as_external {
        let top = fallback_top
            .split('.')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback_top);
        if !is_stdlib(top) {
            external_ids.insert(top.to_string());
            edges.insert((current.to_string(), top.to_string(), EdgeKind::External));
            return Some(top.to_string());
        }
    }
    None
}

fn top_level_segment(id: &str) -> String {
    id.split('.').next().unwrap_or(id).to_string()
}

/// Builds the `GraphNode` for one top-level symbol, nested under its
/// owning module (§4.4). Depth/position are left at the origin; the
/// layout engine copies its parent module's placement onto it (§4.5).
fn symbol_node(module_id: &str, module_path: &str, symbol: &Symbol) -> GraphNode {
    let kind = match symbol.kind {
        SymbolKind::Class => NodeKind::Class,
        SymbolKind::Function => NodeKind::Function,
    };
    let node_type = match symbol.kind {
        SymbolKind::Class => "class",
        SymbolKind::Function => "function",
    };
    let mut stats = BTreeMap::new();
    stats.insert("Complexity".to_string(), symbol.complexity.to_string());
    GraphNode {
        id: format!("{module_id}.{}", symbol.name),
        kind,
        node_type: node_type.to_string(),
        title: symbol.name.clone(),
        path: Some(module_path.to_string()),
        role: symbol.doc.clone(),
        project: top_level_segment(module_id),
        stats,
        x: 0.0,
        y: 0.0,
        parent: Some(module_id.to_string()),
    }
}

/// Derives a module node's semantic `(type, title, role)` from its first
/// metadata tag, per §4.1: `project` tags set both title and role to the
/// captured name; other tags set title only, leaving role empty. Absent
/// any tag, the type defaults to `data` and the role falls back to the
/// module's own docstring's first line.
fn node_identity(visited: &VisitedModule, module_id: &str) -> (String, String, String) {
    let Some(tag) = visited.metadata.first() else {
        let role = visited.docstring.clone().unwrap_or_default();
        return ("data".to_string(), module_id.to_string(), role);
    };
    let name = tag.name.clone().unwrap_or_default();
    let role = if tag.tag == "project" { name.clone() } else { String::new() };
    (tag.semantic_type.clone(), name, role)
}

/// Inverts each symbol's `calls` list into the matching in-module
/// symbol's `called_by`, matching bare names against top-level function
/// and method names declared in this module.
///
/// §8 Invariant 3 (`called_by[g] = {f : g in calls[f]}`) has no
/// self-exclusion: a symbol that only calls itself is still its own
/// caller, so a purely self-recursive function is not reported dead.
fn invert_called_by(mut symbols: Vec<Symbol>) -> Vec<Symbol> {
    let callers: Vec<(String, Vec<String>)> = symbols
        .iter()
        .map(|s| (s.name.clone(), s.calls.clone()))
        .collect();

    for symbol in &mut symbols {
        let mut called_by: Vec<String> = callers
            .iter()
            .filter(|(_, calls)| calls.contains(&symbol.name))
            .map(|(caller, _)| caller.clone())
            .collect();
        called_by.sort();
        called_by.dedup();
        symbol.called_by = called_by;
    }
    symbols
}

fn build_call_graph(symbols: &[Symbol]) -> BTreeMap<String, Vec<String>> {
    let known: BTreeSet<&str> = symbols.iter().map(|s| s.name.as_str()).collect();
    symbols
        .iter()
        .map(|s| {
            let targets: Vec<String> = s
                .calls
                .iter()
                .filter(|c| known.contains(c.as_str()) && *c != &s.name)
                .cloned()
                .collect();
            (s.name.clone(), targets)
        })
        .collect()
}

/// A function is dead when no other symbol in the module calls it and it
/// is not itself an entry point.
fn find_dead_functions(symbols: &[Symbol]) -> Vec<String> {
    let mut dead: Vec<String> = symbols
        .iter()
        .filter(|s| {
            matches!(s.kind, crate::model::SymbolKind::Function)
                && !s.is_entry_point
                && s.called_by.is_empty()
        })
        .map(|s| s.name.clone())
        .collect();
    dead.sort();
    dead
}

fn module_stats(
    lines: usize,
    import_count: usize,
    symbols: &[Symbol],
    metrics: &ComplexityMetrics,
) -> BTreeMap<String, String> {
    let mut stats = BTreeMap::new();
    let classes = symbols
        .iter()
        .filter(|s| matches!(s.kind, crate::model::SymbolKind::Class))
        .count();
    let functions = symbols
        .iter()
        .filter(|s| matches!(s.kind, crate::model::SymbolKind::Function))
        .count();
    let max_complexity = symbols.iter().map(|s| s.complexity).max().unwrap_or(0);

    stats.insert("Lines".to_string(), lines.to_string());
    stats.insert("Classes".to_string(), classes.to_string());
    stats.insert("Functions".to_string(), functions.to_string());
    stats.insert("Imports".to_string(), import_count.to_string());
    stats.insert("MaxComplexity".to_string(), max_complexity.to_string());
    stats.insert("MI".to_string(), format!("{:.1}", metrics.maintainability_index));
    stats.insert("Blocks".to_string(), metrics.total_blocks.to_string());
    if metrics.total_blocks > 0 {
        stats.insert("AvgComplexity".to_string(), format!("{:.1}", metrics.average));
        stats.insert(
            "HighComplexity".to_string(),
            metrics.high_complexity_blocks.to_string(),
        );
    }
    stats
}
