//! Where a node sat in the parser's input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Start position of a syntax node, plus its byte length.
///
/// Positions come from the external parser inside the JSON tree. Nodes built
/// in code carry [`Span::default`], rendered as `0:0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub col: u32,
    /// Older parser output has no length.
    #[serde(default)]
    pub len: u32,
}

impl Span {
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }
}

// Diagnostics print `line:col`; the length only matters to editors.
impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
