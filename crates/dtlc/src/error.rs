//! The pipeline-wide error type, unifying parse, resolve, and elaboration
//! failures. A hand-written sum-type rather than a derive-macro error
//! crate: there is no recovery logic, so a single `match` (or `Display`)
//! on the result is sufficient.

use std::fmt;

use crate::loc::Loc;

/// Every way the pipeline can fail, each carrying the source location
/// where the failure was detected.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input; detected by the lexer or parser.
    Parse { loc: Loc, message: String },
    /// A name has no binder in scope at the reference site.
    UnresolvedVariable { loc: Loc, name: String },
    /// Two top-level definitions share a textual name.
    DuplicateName { loc: Loc, name: String },
    /// `check` found `expected != got` after normalization.
    TypeMismatch { loc: Loc, expected: String, got: String },
    /// `f` in `f x` did not infer to a function type.
    NotAFunctionApplication { loc: Loc, got: String },
    /// A lambda was checked against a non-function type.
    NotAFunctionLambda { loc: Loc, expected: String },
}

impl Error {
    #[must_use]
    pub fn loc(&self) -> Loc {
        match self {
            Error::Parse { loc, .. }
            | Error::UnresolvedVariable { loc, .. }
            | Error::DuplicateName { loc, .. }
            | Error::TypeMismatch { loc, .. }
            | Error::NotAFunctionApplication { loc, .. }
            | Error::NotAFunctionLambda { loc, .. } => *loc,
        }
    }

    /// The diagnostic text alone, without a location prefix. Used by
    /// front ends that render their own `path:line:col:` prefix instead of
    /// this type's own `line:col:`-prefixed [`Display`] impl.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Parse { message, .. } => message.clone(),
            Error::UnresolvedVariable { name, .. } => format!("unresolved variable '{name}'"),
            Error::DuplicateName { name, .. } => format!("duplicate name '{name}'"),
            Error::TypeMismatch { expected, got, .. } => {
                format!("expected '{expected}', got '{got}'")
            }
            Error::NotAFunctionApplication { got, .. } => {
                format!("expected function type, got '{got}'")
            }
            Error::NotAFunctionLambda { expected, .. } => {
                format!("expected '{expected}', got function type")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc(), self.message())
    }
}

impl std::error::Error for Error {}
