//! Small shared helpers: byte-offset to line-number mapping.

use ruff_text_size::TextSize;

/// Converts byte offsets reported by the parser into 1-indexed line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Scans `source` once, recording the byte offset each line begins at.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Line count as defined by the spec: `newline_count + 1`.
#[must_use]
pub fn count_lines(source: &str) -> usize {
    source.bytes().filter(|&b| b == b'\n').count() + 1
}
