//! The final serialized output (§6 "External Interfaces"): a versioned
//! envelope wrapping the node/edge graph, per-module detail records, the
//! layout depth, and a small resolver-diagnostics summary.

use crate::model::{GraphEdge, GraphNode, ModuleDetails, ModuleId};
use crate::resolver::ResolverStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Schema version of the artifact, bumped on any breaking field change.
pub const ARTIFACT_VERSION: &str = "1.0";

/// Resolver diagnostics surfaced alongside the graph, so a caller can
/// tell a clean run from one that silently fell back to fuzzy matching.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverSummary {
    pub exact: usize,
    pub fuzzy_suffix: usize,
    pub basename: usize,
    pub fuzzy_substring: usize,
    pub top_level: usize,
    pub failed: usize,
    pub stdlib: usize,
}

impl From<&ResolverStats> for ResolverSummary {
    fn from(stats: &ResolverStats) -> Self {
        Self {
            exact: stats.exact,
            fuzzy_suffix: stats.fuzzy_suffix,
            basename: stats.basename,
            fuzzy_substring: stats.fuzzy_substring,
            top_level: stats.top_level,
            failed: stats.failed,
            stdlib: stats.stdlib,
        }
    }
}

/// The full analysis result, ready for JSON serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub version: &'static str,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(rename = "moduleDetails")]
    pub module_details: BTreeMap<ModuleId, ModuleDetails>,
    /// Opaque tree handed in by the caller, returned unchanged; the core
    /// never interprets it.
    #[serde(rename = "folderStructure")]
    pub folder_structure: serde_json::Value,
    /// Opaque per-file payload handed in by the caller, returned unchanged.
    #[serde(rename = "fileContents")]
    pub file_contents: serde_json::Value,
    /// Depth assigned to every node id by the layout engine.
    #[serde(rename = "layoutDepth")]
    pub layout_depth: BTreeMap<String, usize>,
    pub metadata: ResolverSummary,
}
