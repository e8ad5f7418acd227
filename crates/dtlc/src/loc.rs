//! Source locations: byte offset, line, and column. Attached to every CST
//! node; never carried into the AST.

use std::fmt;

/// A position in a source file.
///
/// `line` and `col` are 1-indexed to match common editor conventions and
/// the `<path>:<line>:<col>: <message>` diagnostics printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub pos: usize,
    pub line: u32,
    pub col: u32,
}

impl Loc {
    #[must_use]
    pub fn start() -> Self {
        Self { pos: 0, line: 1, col: 1 }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
