//! Source location tracking for error reporting.
//!
//! Spans are byte ranges into the schema source. Line and column are computed
//! on demand from the source text, since schemas are small and errors rare.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte range in a schema source (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of start position
    pub start: usize,
    /// Byte offset of end position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check if this span is zero-length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in bytes (zero for malformed spans).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Merge two spans (returns span covering both).
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// 1-based line and column of the start position within `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.start.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Text covered by this span, if it lies within `source`.
    pub fn snippet<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
