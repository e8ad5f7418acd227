//! The token stream: a `logos`-generated lexer over the grammar's
//! terminals. Whitespace is skipped; the lexer yields byte spans, and the
//! parser converts those spans into line/column `Loc`s using a
//! precomputed table of line-start offsets, so no token carries its own
//! line/column bookkeeping.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[token("fn")]
    Fn,
    #[token("type")]
    Type,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("|")]
    Pipe,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    /// `[a-z][a-z0-9_]*` — a lowercase letter followed by lowercase
    /// alphanumerics or underscores.
    #[regex("[a-z][a-z0-9_]*")]
    Ident,
}

impl Token {
    /// A short, human-readable name used in "expected X" parse error
    /// messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Token::Fn => "'fn'",
            Token::Type => "'type'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Colon => "':'",
            Token::Arrow => "'->'",
            Token::Pipe => "'|'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Ident => "identifier",
        }
    }
}

/// Precomputes the byte offset of the start of each line in `source`, so a
/// byte offset can be converted to a `(line, col)` pair by binary search
/// without rescanning from the beginning every time.
#[must_use]
pub fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in source.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Converts a byte offset into a 1-indexed `(line, col)` pair using a
/// table produced by [`line_starts`].
#[must_use]
pub fn offset_to_line_col(line_starts: &[usize], offset: usize) -> (u32, u32) {
    let line_idx = match line_starts.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    };
    let line_start = line_starts[line_idx];
    #[allow(clippy::cast_possible_truncation)]
    let line = (line_idx + 1) as u32;
    #[allow(clippy::cast_possible_truncation)]
    let col = (offset - line_start + 1) as u32;
    (line, col)
}
