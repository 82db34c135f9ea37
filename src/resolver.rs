//! Import Resolver (§4.3): turns the dotted name written in an import
//! statement into a [`ModuleId`] already present in the module table, or
//! gives up and reports the unresolved top-level segment.
//!
//! Ported from `cytoscnpy::analyzer::semantic::imports::ImportResolver`'s
//! resolution cascade, dropped down to the subset this crate's simpler
//! symbol model needs: no external-stub/symbol-table lookahead, since
//! there is no separate stub database here.

use crate::constants::is_stdlib;
use crate::model::ModuleId;

/// The resolution strategy that ultimately matched, tracked for
/// diagnostics (§4.3 resolver stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Exact,
    FuzzySuffix,
    Basename,
    FuzzySubstring,
    TopLevel,
    Failed,
}

/// The outcome of resolving one dotted import name.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub strategy: Strategy,
    pub module: Option<ModuleId>,
    /// `true` when `module` is a recognized standard-library package and
    /// was never looked up in the module table.
    pub is_stdlib: bool,
}

/// Running counters over every resolution performed in a run.
#[derive(Debug, Clone, Default)]
pub struct ResolverStats {
    pub exact: usize,
    pub fuzzy_suffix: usize,
    pub basename: usize,
    pub fuzzy_substring: usize,
    pub top_level: usize,
    pub failed: usize,
    pub stdlib: usize,
}

impl ResolverStats {
    fn record(&mut self, resolution: &Resolution) {
        if resolution.is_stdlib {
            self.stdlib += 1;
            return;
        }
        match resolution.strategy {
            Strategy::Exact => self.exact += 1,
            Strategy::FuzzySuffix => self.fuzzy_suffix += 1,
            Strategy::Basename => self.basename += 1,
            Strategy::FuzzySubstring => self.fuzzy_substring += 1,
            Strategy::TopLevel => self.top_level += 1,
            Strategy::Failed => self.failed += 1,
        }
    }
}

/// Resolves dotted import names against a known module table.
pub struct ImportResolver<'a> {
    /// Every module id known in this run, used both for exact lookups and
    /// as the candidate set for the fuzzy strategies. Sorted so that
    /// ambiguous fuzzy matches resolve deterministically: the
    /// lexicographically-first candidate wins (§9 ambiguity policy).
    modules: &'a [ModuleId],
    /// Extra top-level names treated as standard-library, beyond the
    /// curated set in [`crate::constants`], per a run's [`crate::config::Config`].
    extra_stdlib: &'a [String],
    stats: ResolverStats,
}

impl<'a> ImportResolver<'a> {
    #[must_use]
    pub fn new(modules: &'a [ModuleId]) -> Self {
        Self {
            modules,
            extra_stdlib: &[],
            stats: ResolverStats::default(),
        }
    }

    /// Builds a resolver that also treats `extra_stdlib` top-level names
    /// as standard-library, on top of the curated set.
    #[must_use]
    pub fn with_extra_stdlib(modules: &'a [ModuleId], extra_stdlib: &'a [String]) -> Self {
        Self {
            modules,
            extra_stdlib,
            stats: ResolverStats::default(),
        }
    }

    fn is_stdlib(&self, top: &str) -> bool {
        is_stdlib(top) || self.extra_stdlib.iter().any(|m| m == top)
    }

    #[must_use]
    pub fn stats(&self) -> &ResolverStats {
        &self.stats
    }

    /// Resolves a relative import: drops the current module's own last
    /// segment to find its containing package, then climbs `level - 1`
    /// further packages up (`level == 1` is "this package", `level == 2`
    /// is "one package up", and so on), per §4.3's algorithm.
    #[must_use]
    pub fn resolve_relative(
        &mut self,
        current_module: &str,
        level: u32,
        base: Option<&str>,
    ) -> Resolution {
        let mut segments: Vec<&str> = current_module.split('.').collect();
        segments.pop();

        let climb = (level as usize).saturating_sub(1);
        let parent_pkg = if climb <= segments.len() {
            let keep = segments.len() - climb;
            segments[..keep].join(".")
        } else {
            segments.join(".")
        };

        let target = match base {
            Some(b) if !parent_pkg.is_empty() => format!("{parent_pkg}.{b}"),
            Some(b) => b.to_string(),
            None => parent_pkg,
        };

        self.resolve_absolute(&target)
    }

    /// Resolves an absolute dotted import name through the full cascade:
    /// exact match, fuzzy suffix, basename, fuzzy substring, top-level
    /// fallback, then failure.
    #[must_use]
    pub fn resolve_absolute(&mut self, dotted: &str) -> Resolution {
        let top = dotted.split('.').next().unwrap_or(dotted);
        if self.is_stdlib(top) {
            let resolution = Resolution {
                strategy: Strategy::Exact,
                module: None,
                is_stdlib: true,
            };
            self.stats.record(&resolution);
            return resolution;
        }

        let resolution = self.resolve_non_stdlib(dotted);
        self.stats.record(&resolution);
        resolution
    }

    fn resolve_non_stdlib(&self, dotted: &str) -> Resolution {
        if self.modules.iter().any(|m| m == dotted) {
            return Resolution {
                strategy: Strategy::Exact,
                module: Some(dotted.to_string()),
                is_stdlib: false,
            };
        }

        let suffix = format!(".{dotted}");
        if let Some(found) = self.modules.iter().find(|m| m.ends_with(&suffix)) {
            return Resolution {
                strategy: Strategy::FuzzySuffix,
                module: Some(found.clone()),
                is_stdlib: false,
            };
        }

        let basename = dotted.rsplit('.').next().unwrap_or(dotted);
        let basename_suffix = format!(".{basename}");
        if let Some(found) = self
            .modules
            .iter()
            .find(|m| m.as_str() == basename || m.ends_with(&basename_suffix))
        {
            return Resolution {
                strategy: Strategy::Basename,
                module: Some(found.clone()),
                is_stdlib: false,
            };
        }

        if let Some(found) = self.modules.iter().find(|m| m.contains(dotted)) {
            return Resolution {
                strategy: Strategy::FuzzySubstring,
                module: Some(found.clone()),
                is_stdlib: false,
            };
        }

        let top = dotted.split('.').next().unwrap_or(dotted);
        if let Some(found) = self
            .modules
            .iter()
            .find(|m| m.split('.').next() == Some(top))
        {
            return Resolution {
                strategy: Strategy::TopLevel,
                module: Some(found.clone()),
                is_stdlib: false,
            };
        }

        Resolution {
            strategy: Strategy::Failed,
            module: None,
            is_stdlib: false,
        }
    }
}
