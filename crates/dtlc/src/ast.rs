//! The abstract syntax tree: elaborator output. Terms carry no source
//! locations; every binder and reference carries a unique [`crate::id::Id`].

use crate::id::Var;
use crate::syntax::{Def, Param};
use std::collections::HashMap;

/// A well-typed (or in-progress-of-being-checked) term.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A variable reference.
    Ref(Var),
    /// The universe, `U`. In this system `U : U`.
    Univ,
    /// `|p| { body }` — a lambda with a typed parameter.
    Fn(Box<Param<Term>>, Box<Term>),
    /// `(p) -> body` — a dependent function type.
    FnType(Box<Param<Term>>, Box<Term>),
    /// `f x` — application.
    App(Box<Term>, Box<Term>),
}

impl Term {
    #[must_use]
    pub fn fn_type(param: Param<Term>, body: Term) -> Self {
        Term::FnType(Box::new(param), Box::new(body))
    }

    #[must_use]
    pub fn fn_(param: Param<Term>, body: Term) -> Self {
        Term::Fn(Box::new(param), Box::new(body))
    }

    #[must_use]
    pub fn app(f: Term, x: Term) -> Self {
        Term::App(Box::new(f), Box::new(x))
    }
}

/// The append-only table of already-elaborated top-level definitions,
/// keyed by the definition name's binder id. Owned by the elaborator;
/// consulted (read-only) by the normalizer and by `infer` on a free
/// reference.
pub type Globals = HashMap<crate::id::Id, Def<Term>>;

/// The in-scope local typing context: binder id to declared type. Owned by
/// the elaborator and mutated under strict guard/restore stack discipline.
pub type Locals = HashMap<crate::id::Id, Term>;

/// Folds a definition's parameter list right-to-left over its body to get
/// the value a free reference to it denotes — `fn id (a:type)(x:a) -> a
/// {x}` becomes the closed lambda `|a| { |x| { x } }`.
#[must_use]
pub fn to_value(def: &Def<Term>) -> Term {
    def.params
        .iter()
        .rev()
        .fold(def.body.clone(), |acc, p| Term::fn_(p.clone(), acc))
}

/// Folds a definition's parameter list right-to-left over its declared
/// return type to get the type a free reference to it denotes — the
/// identity function above has type `(a:type) -> (x:a) -> a`.
#[must_use]
pub fn to_type(def: &Def<Term>) -> Term {
    def.params
        .iter()
        .rev()
        .fold(def.ret.clone(), |acc, p| Term::fn_type(p.clone(), acc))
}
