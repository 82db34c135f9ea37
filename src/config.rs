//! Run configuration, loaded from an optional TOML file.
//!
//! Ported from `cytoscnpy::config::Config`'s serde-derived, TOML-backed
//! shape, trimmed to the knobs this crate's pipeline actually reads.

use serde::Deserialize;

/// Granularity at which the graph assembler emits symbol-level nodes,
/// alongside the always-present module nodes (§6 "Configuration").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolLevel {
    /// Only module nodes/edges are emitted.
    #[default]
    Module,
    /// Class/function nodes are emitted alongside their owning module.
    Symbol,
}

/// Which built-in [`crate::metrics::MetricProvider`] the orchestrator
/// should use when the caller does not supply its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricProviderKind {
    Null,
    #[default]
    Basic,
}

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub symbol_level: SymbolLevel,
    pub metric_provider: MetricProviderKind,
    /// Extra top-level module names to treat as standard-library, beyond
    /// the curated set in [`crate::constants::stdlib_modules`].
    pub extra_stdlib_modules: Vec<String>,
    /// Relative directory names to skip during directory discovery.
    pub exclude_folders: Vec<String>,
}

impl Config {
    /// Parses a `Config` from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, MetricProviderKind, SymbolLevel};

    #[test]
    fn defaults_are_module_level_and_basic_metrics() {
        let config = Config::default();
        assert_eq!(config.symbol_level, SymbolLevel::Module);
        assert_eq!(config.metric_provider, MetricProviderKind::Basic);
    }

    #[test]
    fn parses_overrides_from_toml() {
        let config = Config::from_toml(
            r#"
            symbol_level = "symbol"
            metric_provider = "null"
            extra_stdlib_modules = ["mypkg"]
            exclude_folders = ["vendor"]
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.symbol_level, SymbolLevel::Symbol);
        assert_eq!(config.metric_provider, MetricProviderKind::Null);
        assert_eq!(config.extra_stdlib_modules, vec!["mypkg".to_string()]);
        assert_eq!(config.exclude_folders, vec!["vendor".to_string()]);
    }
}
