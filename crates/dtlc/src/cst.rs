//! The concrete syntax tree: parser output, with source locations on every
//! node and variable references initially marked `Unresolved`.

use crate::id::Var;
use crate::loc::Loc;
use crate::syntax::Param;

/// A parsed expression, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A name reference before resolution — only the text is known.
    Unresolved(Loc, Var),
    /// A name reference after resolution — `v.id` equals its binder's id.
    Resolved(Loc, Var),
    /// The universe, `type`.
    Univ(Loc),
    /// `|v| { body }` — a lambda with a single, unannotated parameter.
    Fn(Loc, Var, Box<Expr>),
    /// `(v: typ) -> body` — a dependent function type.
    FnType(Loc, Box<Param<Expr>>, Box<Expr>),
    /// `f x` — application.
    App(Loc, Box<Expr>, Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn loc(&self) -> Loc {
        match self {
            Expr::Unresolved(loc, _)
            | Expr::Resolved(loc, _)
            | Expr::Univ(loc)
            | Expr::Fn(loc, _, _)
            | Expr::FnType(loc, _, _)
            | Expr::App(loc, _, _) => *loc,
        }
    }
}
