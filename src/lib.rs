//! Core library for the dependency/call-graph analyzer.
//!
//! Turns a set of `(path, source text)` pairs for a Python-like codebase
//! into a fully resolved dependency/call graph with a radial layout and
//! per-module detail records. See `SPEC_FULL.md` at the repository root
//! for the full contract.
#![allow(clippy::too_many_arguments, clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Output artifact types (`GraphNode`, `GraphEdge`, `ModuleDetails`, `Artifact`).
pub mod artifact;
/// Command-line argument definitions.
pub mod cli;
/// TOML-backed run configuration.
pub mod config;
/// Curated lookup tables (stdlib set, entry-point decorator names, metadata regex).
pub mod constants;
/// Graph assembly: node/edge emission, external folding, dead-code/caller inversion.
pub mod graph;
/// SCC condensation, depth layering, and radial placement.
pub mod layout;
/// The pluggable complexity/maintainability metric provider interface.
pub mod metrics;
/// Path -> dotted module id conversion and project root detection.
pub mod module_mapper;
/// Drives the pipeline end to end and emits the final `Artifact`.
pub mod orchestrator;
/// Thin wrapper around the Python AST parser.
pub mod parser;
/// Import dotted-name -> module-id resolution cascade.
pub mod resolver;
/// Shared data model: `ModuleId`, `Symbol`, `ImportRecord`, `ComplexityMetrics`.
pub mod model;
/// Byte-offset -> line-number mapping and small path helpers.
pub mod utils;
/// AST visitors: imports, calls, symbols, entry points, metadata tag.
pub mod visitor;
