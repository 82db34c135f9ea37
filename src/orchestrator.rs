//! Drives the pipeline end to end: parses every source file, runs the
//! visitors and metric provider, assembles the graph, lays it out, and
//! wraps the result in the final [`Artifact`] (§5 "Concurrency &
//! Resource Model").
//!
//! Ported from `cytoscnpy::analyzer::processing`'s chunked `rayon`
//! parallel map: files are split into fixed-size chunks so a very large
//! run releases intermediate allocations every [`CHUNK_SIZE`] files
//! instead of holding everything until the very end.

use crate::artifact::{Artifact, ResolverSummary, ARTIFACT_VERSION};
use crate::config::{Config, MetricProviderKind, SymbolLevel};
use crate::graph::{self, ModuleInput};
use crate::layout;
use crate::metrics::{BasicMetricProvider, MetricProvider, NullMetricProvider};
use crate::module_mapper;
use crate::parser;
use crate::visitor::{self, VisitedModule};
use chrono::Utc;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Files are processed in chunks of this size, matching the teacher's
/// own bulk-release discipline.
pub const CHUNK_SIZE: usize = 500;

/// Runs the full pipeline over a batch of `(path, source)` pairs.
pub struct Orchestrator {
    provider: Box<dyn MetricProvider>,
    extra_stdlib_modules: Vec<String>,
    symbol_level: SymbolLevel,
}

impl Orchestrator {
    /// Builds an orchestrator using the metric provider named in `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let provider: Box<dyn MetricProvider> = match config.metric_provider {
            MetricProviderKind::Null => Box::new(NullMetricProvider),
            MetricProviderKind::Basic => Box::new(BasicMetricProvider),
        };
        Self {
            provider,
            extra_stdlib_modules: config.extra_stdlib_modules.clone(),
            symbol_level: config.symbol_level,
        }
    }

    /// Builds an orchestrator around a caller-supplied metric provider
    /// (§6's "metric provider is an external collaborator" contract).
    #[must_use]
    pub fn with_provider(provider: Box<dyn MetricProvider>) -> Self {
        Self {
            provider,
            extra_stdlib_modules: Vec::new(),
            symbol_level: SymbolLevel::default(),
        }
    }

    /// Analyzes `sources`, returning the fully assembled, laid-out artifact.
    ///
    /// Equivalent to [`Self::analyze_with_passthrough`] with no
    /// `folder_structure`/`file_contents` payload.
    #[must_use]
    pub fn analyze(&self, sources: Vec<(PathBuf, String)>) -> Artifact {
        self.analyze_with_passthrough(sources, serde_json::Value::Null, serde_json::Value::Null)
    }

    /// Analyzes `sources`, threading the caller's opaque `folder_structure`
    /// and `file_contents` payloads through to the output artifact
    /// unchanged (§6 "External Interfaces" — the core never interprets
    /// either).
    #[must_use]
    pub fn analyze_with_passthrough(
        &self,
        mut sources: Vec<(PathBuf, String)>,
        folder_structure: serde_json::Value,
        file_contents: serde_json::Value,
    ) -> Artifact {
        sources.sort_by(|a, b| a.0.cmp(&b.0));
        let paths: Vec<PathBuf> = sources.iter().map(|(p, _)| p.clone()).collect();
        let root = module_mapper::detect_project_root(&paths);

        let inputs: Vec<ModuleInput> = sources
            .par_chunks(CHUNK_SIZE)
            .flat_map(|chunk| {
                chunk
                    .iter()
                    .filter_map(|(path, source)| self.process_file(&root, path, source))
                    .collect::<Vec<_>>()
            })
            .collect();

        let assembled = graph::assemble(inputs, &self.extra_stdlib_modules, self.symbol_level);

        let mut nodes: Vec<_> = assembled.modules.iter().map(|m| m.node.clone()).collect();
        nodes.extend(assembled.external_nodes);
        nodes.extend(assembled.symbol_nodes);

        let layout_depth = layout::layout(&mut nodes, &assembled.edges);

        let module_details = assembled
            .modules
            .into_iter()
            .map(|m| (m.node.id.clone(), m.details))
            .collect();

        Artifact {
            version: ARTIFACT_VERSION,
            generated_at: Utc::now(),
            nodes,
            edges: assembled.edges,
            module_details,
            folder_structure,
            file_contents,
            layout_depth,
            metadata: ResolverSummary::from(&assembled.resolver_stats),
        }
    }

    fn process_file(&self, root: &Path, path: &Path, source: &str) -> Option<ModuleInput> {
        let id = module_mapper::module_id_for(root, path)?;
        let lines = crate::utils::count_lines(source);
        let (metrics, blocks) = self.provider.analyze(source);

        let visited = parser::parse_source(source).map_or_else(
            |_| VisitedModule {
                symbols: Vec::new(),
                imports: Vec::new(),
                module_calls: Vec::new(),
                entry_points: Vec::new(),
                metadata: visitor::metadata::scan_metadata(source),
                docstring: None,
            },
            |module| visitor::visit_module(source, &module, &blocks),
        );

        Some(ModuleInput {
            id,
            path: path.display().to_string(),
            lines,
            visited,
            metrics,
        })
    }
}
