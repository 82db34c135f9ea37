//! Metadata tag scan: `@<tag> [name: <name>]` comments anywhere in the raw
//! source, independent of the AST (§4.1).

use crate::constants::metadata_tag_re;

/// A single recognized metadata tag.
#[derive(Debug, Clone)]
pub struct MetadataTag {
    pub tag: String,
    pub name: Option<String>,
    /// Semantic type derived from the tag; `project` maps to `"data"`.
    pub semantic_type: String,
}

/// Scans `source` for metadata tags, in the order they appear.
#[must_use]
pub fn scan_metadata(source: &str) -> Vec<MetadataTag> {
    metadata_tag_re()
        .captures_iter(source)
        .map(|caps| {
            let tag = caps[1].to_lowercase();
            let name = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());
            let semantic_type = if tag == "project" {
                "data".to_string()
            } else {
                tag.clone()
            };
            MetadataTag {
                tag,
                name,
                semantic_type,
            }
        })
        .collect()
}
