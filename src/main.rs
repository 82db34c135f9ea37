//! Development-convenience binary: walks a directory of Python source
//! files and prints the resulting dependency/call-graph artifact as JSON.
//!
//! This binary is a thin CLI shell around [`pygraphscope::orchestrator`];
//! the spec's actual external interface is the library call, not this
//! executable. Directory discovery here is a plain recursive walk with a
//! fixed exclude list — no `.gitignore` awareness, unlike the teacher's
//! own `ignore`-backed walker, since that integration is out of scope.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pygraphscope::cli::Cli;
use pygraphscope::config::{Config, MetricProviderKind, SymbolLevel};
use pygraphscope::orchestrator::Orchestrator;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_EXCLUDE: &[&str] = &[".git", "__pycache__", "venv", ".venv", "node_modules"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Config::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => Config::default(),
    };
    if cli.symbol_level {
        config.symbol_level = SymbolLevel::Symbol;
    }
    if cli.no_metrics {
        config.metric_provider = MetricProviderKind::Null;
    }

    let roots = if cli.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.paths.clone()
    };

    let mut files = Vec::new();
    for root in &roots {
        collect_python_files(root, &config.exclude_folders, &mut files);
    }
    files.sort();

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        match fs::read_to_string(&path) {
            Ok(text) => sources.push((path, text)),
            Err(err) => {
                progress.println(format!(
                    "{} {}: {err}",
                    "skipping unreadable file".yellow(),
                    path.display()
                ));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let orchestrator = Orchestrator::new(&config);
    let artifact = orchestrator.analyze(sources);

    let json = serde_json::to_string_pretty(&artifact).context("serializing artifact")?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing output to {}", path.display()))?;
            println!("{} {}", "wrote".green(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn collect_python_files(root: &Path, exclude: &[String], out: &mut Vec<PathBuf>) {
    if root.is_file() {
        if root.extension().is_some_and(|ext| ext == "py") {
            out.push(root.to_path_buf());
        }
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if DEFAULT_EXCLUDE.contains(&name) || exclude.iter().any(|e| e == name) {
            continue;
        }
        if path.is_dir() {
            collect_python_files(&path, exclude, out);
        } else if path.extension().is_some_and(|ext| ext == "py") {
            out.push(path);
        }
    }
}
