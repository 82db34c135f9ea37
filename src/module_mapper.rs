//! Module Mapper (§4.2): converts a file path relative to a detected
//! project root into a dotted [`ModuleId`].

use crate::constants::ROOT_HINT_FOLDERS;
use crate::model::ModuleId;
use std::path::{Path, PathBuf};

/// Finds the project root among a batch of input paths (§4.2).
///
/// The *first* segment of each path is its only root-hint candidate — a
/// hint folder that appears deeper in a path (e.g. a subpackage
/// incidentally named `lib`) is not a root. A first-segment hint is only
/// honored when it is a genuine wrapper, i.e. it leaves further nested
/// directory structure beneath it for at least one file in the batch;
/// otherwise the hint folder is itself the project's only top-level
/// package (spec's own S1 example: bare `pkg/a.ext`, `pkg/b.ext`, where
/// `pkg` is both a hint word and the package itself, and must be kept,
/// not stripped). Falls back to the common ancestor of all paths'
/// containing directories when no hint applies.
#[must_use]
pub fn detect_project_root(paths: &[PathBuf]) -> PathBuf {
    let mut best: Option<PathBuf> = None;
    for path in paths {
        let Some(hint) = first_segment_hint_root(path) else {
            continue;
        };
        // Require genuine nesting below the hint for *some* file in the
        // batch, or the hint folder is the package itself, not a wrapper.
        let nested = paths.iter().any(|p| {
            p.strip_prefix(&hint)
                .is_ok_and(|rel| rel.components().count() > 1)
        });
        if !nested {
            continue;
        }
        let better = best
            .as_ref()
            .map_or(true, |b: &PathBuf| hint.components().count() < b.components().count());
        if better {
            best = Some(hint);
        }
    }
    best.unwrap_or_else(|| common_ancestor(paths))
}

/// Returns `path`'s first component as a root candidate if it names one
/// of [`ROOT_HINT_FOLDERS`].
fn first_segment_hint_root(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    let first = components.next()?;
    let name = first.as_os_str().to_str()?;
    ROOT_HINT_FOLDERS
        .contains(&name)
        .then(|| PathBuf::from(first.as_os_str()))
}

/// Longest common prefix of every path's containing directory.
///
/// When every file in the batch shares the exact same containing
/// directory (no divergence at all, including the single-file case),
/// that directory is itself the package, not a wrapper around it, so one
/// more level is popped before returning — otherwise a bare `pkg/a.ext`,
/// `pkg/b.ext` batch would return `pkg` as the root and strip it from
/// the dotted module id, contradicting spec's own S1 example.
fn common_ancestor(paths: &[PathBuf]) -> PathBuf {
    let Some(first) = paths.first() else {
        return PathBuf::new();
    };
    let mut prefix: Vec<_> = first
        .parent()
        .unwrap_or(Path::new(""))
        .components()
        .collect();
    let mut diverged = false;
    for path in &paths[1..] {
        let dir = path.parent().unwrap_or(Path::new(""));
        let comps: Vec<_> = dir.components().collect();
        let common = prefix
            .iter()
            .zip(comps.iter())
            .take_while(|(a, b)| a == b)
            .count();
        if common < prefix.len() || common < comps.len() {
            diverged = true;
        }
        prefix.truncate(common);
    }
    if !diverged {
        prefix.pop();
    }
    prefix.iter().collect()
}

/// Derives a dotted module id from `path` relative to `root`.
///
/// `a/b/c.py` -> `a.b.c`; `a/b/__init__.py` -> `a.b`. Returns `None` if
/// `path` does not lie under `root` or carries no file stem.
#[must_use]
pub fn module_id_for(root: &Path, path: &Path) -> Option<ModuleId> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str().map(ToString::to_string))
        .collect();

    let last = segments.pop()?;
    let stem = last.strip_suffix(".py").unwrap_or(&last).to_string();
    if stem != "__init__" {
        segments.push(stem);
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}

#[cfg(test)]
mod tests {
    use super::{detect_project_root, module_id_for};
    use std::path::{Path, PathBuf};

    #[test]
    fn detects_root_via_hint_folder() {
        let paths = vec![
            PathBuf::from("src/app/main.py"),
            PathBuf::from("src/app/routes.py"),
        ];
        assert_eq!(detect_project_root(&paths), PathBuf::from("src"));
    }

    #[test]
    fn falls_back_to_common_ancestor_without_a_hint_folder() {
        let paths = vec![
            PathBuf::from("/work/proj/a/one.py"),
            PathBuf::from("/work/proj/b/two.py"),
        ];
        assert_eq!(detect_project_root(&paths), PathBuf::from("/work/proj"));
    }

    #[test]
    fn a_top_level_package_sharing_a_hint_name_is_not_stripped() {
        // S1: no wrapping `src/`, and the package's own name (`pkg`) happens
        // to be a root-hint word with no further nesting beneath it.
        let paths = vec![
            PathBuf::from("pkg/__init__.py"),
            PathBuf::from("pkg/a.py"),
            PathBuf::from("pkg/b.py"),
        ];
        assert_eq!(detect_project_root(&paths), PathBuf::new());
    }

    #[test]
    fn module_id_joins_package_segments_with_dots() {
        let root = Path::new("/repo/src");
        let path = Path::new("/repo/src/app/routes.py");
        assert_eq!(module_id_for(root, path).as_deref(), Some("app.routes"));
    }

    #[test]
    fn init_py_maps_to_its_containing_package() {
        let root = Path::new("/repo/src");
        let path = Path::new("/repo/src/app/__init__.py");
        assert_eq!(module_id_for(root, path).as_deref(), Some("app"));
    }

    #[test]
    fn top_level_init_py_has_no_module_id() {
        let root = Path::new("/repo/src");
        let path = Path::new("/repo/src/__init__.py");
        assert_eq!(module_id_for(root, path), None);
    }
}
