//! Layout Engine (§4.5): SCC condensation, topological depth layering,
//! and radial placement.

use crate::model::{EdgeKind, GraphEdge, GraphNode};
use petgraph::algo::condensation;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Base radius for depth 0; each further depth adds [`DEPTH_SPACING`].
const BASE_RADIUS: f64 = 300.0;
const DEPTH_SPACING: f64 = 200.0;
/// Radius of the single fallback circle when no node has a layout-eligible edge.
const FALLBACK_RADIUS: f64 = 500.0;

/// Assigns `x`/`y` coordinates to every node in place, returning the
/// depth assigned to each node id (the artifact's `layout_depth` field).
///
/// Symbol-level nodes (§4.4, identified by a set `parent`) never
/// participate in the SCC/depth computation themselves; they inherit
/// their parent module's depth and position (§4.5 point 4) once the
/// module-level layout is settled. `Defines` edges never enter the
/// condensation graph — they point at a symbol node, not another module.
pub fn layout(nodes: &mut [GraphNode], edges: &[GraphEdge]) -> BTreeMap<String, usize> {
    let mut index_of: FxHashMap<String, NodeIndex> = FxHashMap::default();
    let mut graph: DiGraph<String, ()> = DiGraph::new();

    for node in nodes.iter().filter(|n| n.parent.is_none()) {
        let idx = graph.add_node(node.id.clone());
        index_of.insert(node.id.clone(), idx);
    }

    let mut has_edge = false;
    for edge in edges {
        if edge.edge_type == EdgeKind::Defines {
            continue;
        }
        if let (Some(&from), Some(&to)) = (index_of.get(&edge.from), index_of.get(&edge.to)) {
            if from != to {
                graph.add_edge(from, to, ());
                has_edge = true;
            }
        }
    }

    if !has_edge {
        place_fallback_circle(nodes);
        let mut depths: BTreeMap<String, usize> = nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| (n.id.clone(), 0))
            .collect();
        inherit_symbol_depth_and_position(nodes, &mut depths);
        return depths;
    }

    let condensed = condensation(graph, false);

    // Each supernode's weight is the list of original node ids folded
    // into it; map every original id back to its supernode index.
    let mut scc_of: FxHashMap<String, usize> = FxHashMap::default();
    for (condensed_idx, weight) in condensed.node_weights().enumerate() {
        for id in weight {
            scc_of.insert(id.clone(), condensed_idx);
        }
    }

    let depths = topological_depths(&condensed);

    let mut per_depth_total: FxHashMap<usize, usize> = FxHashMap::default();
    for node in nodes.iter().filter(|n| n.parent.is_none()) {
        let depth = scc_of
            .get(&node.id)
            .and_then(|scc| depths.get(scc))
            .copied()
            .unwrap_or(0);
        *per_depth_total.entry(depth).or_insert(0) += 1;
    }

    let mut per_depth_seen: FxHashMap<usize, usize> = FxHashMap::default();
    let mut node_depths = BTreeMap::new();
    for node in nodes.iter_mut().filter(|n| n.parent.is_none()) {
        let depth = scc_of
            .get(&node.id)
            .and_then(|scc| depths.get(scc))
            .copied()
            .unwrap_or(0);
        node_depths.insert(node.id.clone(), depth);

        let total_at_depth = per_depth_total.get(&depth).copied().unwrap_or(1).max(1);
        let seen = per_depth_seen.entry(depth).or_insert(0);
        let angle = TAU * (*seen as f64) / (total_at_depth as f64).max(1.0);
        *seen += 1;

        let radius = BASE_RADIUS + (depth as f64) * DEPTH_SPACING;
        node.x = radius * angle.cos();
        node.y = radius * angle.sin();
    }

    inherit_symbol_depth_and_position(nodes, &mut node_depths);
    node_depths
}

/// Copies each symbol node's owning module's `(x, y)` and depth onto it,
/// and records the symbol's own id in `depths` so every node — module or
/// symbol — appears in the artifact's `layout_depth` map.
fn inherit_symbol_depth_and_position(nodes: &mut [GraphNode], depths: &mut BTreeMap<String, usize>) {
    let parents: BTreeMap<String, (f64, f64, usize)> = nodes
        .iter()
        .filter(|n| n.parent.is_none())
        .filter_map(|n| depths.get(&n.id).map(|&d| (n.id.clone(), (n.x, n.y, d))))
        .collect();

    let mut updates = Vec::new();
    for node in nodes.iter() {
        if let Some(parent_id) = &node.parent {
            if let Some(&(x, y, depth)) = parents.get(parent_id) {
                updates.push((node.id.clone(), x, y, depth));
            }
        }
    }
    for (id, x, y, depth) in updates {
        if let Some(node) = nodes.iter_mut().find(|n| n.id == id) {
            node.x = x;
            node.y = y;
        }
        depths.insert(id, depth);
    }
}

/// Longest-path depth over a DAG via Kahn's algorithm: nodes with no
/// incoming edges start at depth 0; every other node's depth is one more
/// than the deepest of its predecessors.
fn topological_depths<N, E>(dag: &DiGraph<N, E>) -> FxHashMap<usize, usize> {
    use petgraph::visit::EdgeRef;
    use petgraph::Direction;

    let mut in_degree: FxHashMap<NodeIndex, usize> = FxHashMap::default();
    for idx in dag.node_indices() {
        in_degree.insert(idx, dag.edges_directed(idx, Direction::Incoming).count());
    }

    let mut depth: FxHashMap<NodeIndex, usize> = FxHashMap::default();
    let mut queue: std::collections::VecDeque<NodeIndex> = dag
        .node_indices()
        .filter(|idx| in_degree.get(idx).copied().unwrap_or(0) == 0)
        .collect();
    for idx in &queue {
        depth.insert(*idx, 0);
    }

    while let Some(idx) = queue.pop_front() {
        let d = depth.get(&idx).copied().unwrap_or(0);
        for edge in dag.edges_directed(idx, Direction::Outgoing) {
            let target = edge.target();
            let candidate = d + 1;
            let better = depth.get(&target).copied().map_or(true, |cur| candidate > cur);
            if better {
                depth.insert(target, candidate);
            }
            if let Some(remaining) = in_degree.get_mut(&target) {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    queue.push_back(target);
                }
            }
        }
    }

    depth.into_iter().map(|(idx, d)| (idx.index(), d)).collect()
}

fn place_fallback_circle(nodes: &mut [GraphNode]) {
    let count = nodes.iter().filter(|n| n.parent.is_none()).count().max(1);
    let mut i = 0;
    for node in nodes.iter_mut().filter(|n| n.parent.is_none()) {
        let angle = TAU * (i as f64) / (count as f64);
        node.x = FALLBACK_RADIUS * angle.cos();
        node.y = FALLBACK_RADIUS * angle.sin();
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::layout;
    use crate::model::{EdgeKind, GraphEdge, GraphNode, NodeKind};
    use std::collections::BTreeMap;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            kind: NodeKind::Module,
            node_type: "module".to_string(),
            title: id.to_string(),
            path: None,
            role: "module".to_string(),
            project: id.to_string(),
            stats: BTreeMap::new(),
            x: 0.0,
            y: 0.0,
            parent: None,
        }
    }

    fn edge(from: &str, to: &str) -> GraphEdge {
        GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
            edge_type: EdgeKind::Imports,
        }
    }

    #[test]
    fn isolated_nodes_fall_back_to_a_single_circle() {
        let mut nodes = vec![node("a"), node("b"), node("c")];
        let depths = layout(&mut nodes, &[]);
        assert!(depths.values().all(|&d| d == 0));
        let radius = nodes[0].x.hypot(nodes[0].y);
        assert!((radius - 500.0).abs() < 1e-6);
    }

    #[test]
    fn a_chain_gets_increasing_depth_and_radius() {
        let mut nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![edge("a", "b"), edge("b", "c")];
        let depths = layout(&mut nodes, &edges);
        assert_eq!(depths["a"], 0);
        assert_eq!(depths["b"], 1);
        assert_eq!(depths["c"], 2);

        let radius_of = |id: &str| {
            let n = nodes.iter().find(|n| n.id == id).unwrap();
            n.x.hypot(n.y)
        };
        assert!(radius_of("a") < radius_of("b"));
        assert!(radius_of("b") < radius_of("c"));
    }

    #[test]
    fn a_cycle_is_condensed_to_a_single_depth() {
        let mut nodes = vec![node("a"), node("b")];
        let edges = vec![edge("a", "b"), edge("b", "a")];
        let depths = layout(&mut nodes, &edges);
        assert_eq!(depths["a"], 0);
        assert_eq!(depths["b"], 0);
    }

    #[test]
    fn symbol_nodes_inherit_their_parent_modules_depth_and_position() {
        let mut symbol = node("a.helper");
        symbol.kind = NodeKind::Function;
        symbol.parent = Some("a".to_string());

        let mut nodes = vec![node("a"), node("b"), symbol];
        let edges = vec![edge("a", "b")];
        let depths = layout(&mut nodes, &edges);

        assert_eq!(depths["a"], 0);
        assert_eq!(depths["a.helper"], 0);

        let module = nodes.iter().find(|n| n.id == "a").unwrap().clone();
        let symbol_node = nodes.iter().find(|n| n.id == "a.helper").unwrap();
        assert_eq!(symbol_node.x, module.x);
        assert_eq!(symbol_node.y, module.y);
    }

    #[test]
    fn symbol_nodes_never_enter_the_condensation_graph() {
        // A Defines edge must not create a spurious module-to-module edge
        // when the "target" is really a symbol node.
        let mut symbol = node("a.helper");
        symbol.parent = Some("a".to_string());

        let mut nodes = vec![node("a"), symbol];
        let edges = vec![GraphEdge {
            from: "a".to_string(),
            to: "a.helper".to_string(),
            edge_type: EdgeKind::Defines,
        }];
        let depths = layout(&mut nodes, &edges);
        assert_eq!(depths["a"], 0);
        assert_eq!(depths["a.helper"], 0);
    }

    #[test]
    fn self_edges_are_ignored() {
        let mut nodes = vec![node("a")];
        let edges = vec![edge("a", "a")];
        let depths = layout(&mut nodes, &edges);
        assert_eq!(depths["a"], 0);
        let radius = nodes[0].x.hypot(nodes[0].y);
        assert!((radius - 500.0).abs() < 1e-6);
    }
}
