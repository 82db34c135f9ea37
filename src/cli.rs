//! Command-line argument definitions for the development-convenience
//! binary, in the shape of `cytoscnpy::cli`'s `clap`-derived structs.

use clap::Parser;
use std::path::PathBuf;

/// Builds a dependency/call graph for a directory of Python source files.
#[derive(Debug, Parser)]
#[command(name = "pygraphscope", version, about)]
pub struct Cli {
    /// Files or directories to analyze.
    pub paths: Vec<PathBuf>,

    /// Where to write the JSON artifact; stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a TOML config file overriding the defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit class/function nodes alongside module nodes.
    #[arg(long)]
    pub symbol_level: bool,

    /// Skip complexity/maintainability scoring entirely.
    #[arg(long)]
    pub no_metrics: bool,

    /// Suppress the progress bar.
    #[arg(short, long)]
    pub quiet: bool,
}
