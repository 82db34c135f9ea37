//! Curated lookup tables shared across the pipeline.
//!
//! Follows the `cytoscnpy::constants` convention of lazily-built static
//! tables behind `OnceLock`, keyed by fast `rustc-hash` sets rather than
//! the standard library's `HashSet`.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Directories treated as likely project roots when present as a path's
/// first segment (§4.2 Module Mapper).
pub const ROOT_HINT_FOLDERS: &[&str] = &["src", "python", "lib", "pkg", "app"];

/// Bare decorator identifiers that mark a function as an entry point.
pub const ENTRY_DECORATOR_NAMES: &[&str] = &["app", "route"];

/// Attribute names (e.g. `@app.get`) that mark a function as an entry point.
pub const ENTRY_DECORATOR_ATTRS: &[&str] =
    &["get", "post", "put", "delete", "patch", "route"];

/// Metadata tags recognized by the `@<tag> [name: <name>]` source scan.
pub const METADATA_TAGS: &[&str] = &["agent", "rsi", "memory", "haa", "data", "project"];

/// Returns the curated standard-library top-level module names.
///
/// Used as the fallback when no runtime introspection is available (the
/// core never shells out to a live interpreter to enumerate these).
pub fn stdlib_modules() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "abc", "argparse", "array", "ast", "asyncio", "base64", "bisect", "builtins",
            "calendar", "collections", "concurrent", "contextlib", "copy", "csv", "ctypes",
            "dataclasses", "datetime", "decimal", "difflib", "dis", "email", "enum", "errno",
            "functools", "gc", "getpass", "glob", "gzip", "hashlib", "heapq", "hmac", "html",
            "http", "importlib", "inspect", "io", "ipaddress", "itertools", "json", "keyword",
            "logging", "math", "multiprocessing", "numbers", "operator", "os", "pathlib",
            "pickle", "platform", "pprint", "queue", "random", "re", "sched", "secrets",
            "select", "shelve", "shutil", "signal", "site", "socket", "sqlite3", "ssl",
            "stat", "statistics", "string", "struct", "subprocess", "sys", "sysconfig",
            "tempfile", "textwrap", "threading", "time", "timeit", "tkinter", "token",
            "tokenize", "traceback", "types", "typing", "unittest", "urllib", "uuid",
            "venv", "warnings", "weakref", "xml", "zipfile", "zlib", "__future__",
        ]
        .into_iter()
        .collect()
    })
}

/// Returns `true` if `top_segment` names a curated standard-library module.
#[must_use]
pub fn is_stdlib(top_segment: &str) -> bool {
    stdlib_modules().contains(top_segment)
}

/// Regex for the `@<tag> [name: <name>]` metadata scan (§4.1).
///
/// # Panics
/// Panics if the pattern fails to compile; the pattern is fixed at
/// compile time so this can only happen if the constant itself is edited
/// incorrectly.
pub fn metadata_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?i)@(agent|rsi|memory|haa|data|project)\b(?:\s*\[\s*name:\s*([^\]]*)\])?")
            .expect("invalid metadata tag regex")
    })
}
