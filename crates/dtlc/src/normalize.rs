//! The normalizer: a substitution-based evaluator that reduces an AST term
//! to normal form by β-reduction, with capture avoided via mandatory
//! renaming on substitution. Global definitions are already expanded to
//! their values by the elaborator's `infer` before a term ever reaches
//! here, so this stage only ever has to deal with β-redexes.
//!
//! Termination: the source language has no explicit recursion and no
//! fixpoint, so normalization terminates on all well-typed terms. The
//! elaborator only ever normalizes terms it has already validated the
//! outermost structure of; callers must not normalize arbitrary
//! ill-typed input.

use std::collections::HashMap;

use crate::ast::Term;
use crate::id::{Id, Ids};
use crate::rename;
use crate::syntax::Param;

/// A normalizer session: owns the substitution environment for a single
/// `term`/`subst`/`apply` call tree. `ids` is borrowed from the caller so
/// every rename-on-substitution draws from the same shared counter.
pub struct Normalizer<'a> {
    ids: &'a mut Ids,
    env: HashMap<Id, Term>,
}

impl<'a> Normalizer<'a> {
    #[must_use]
    pub fn new(ids: &'a mut Ids) -> Self {
        Self { ids, env: HashMap::new() }
    }

    /// Normalizes `term` once under the current environment.
    pub fn term(&mut self, term: &Term) -> Term {
        match term {
            Term::Ref(v) => match self.env.get(&v.id).cloned() {
                Some(replacement) => {
                    let renamed = rename::rename(self.ids, &replacement);
                    self.term(&renamed)
                }
                None => term.clone(),
            },
            Term::App(f, x) => {
                let f = self.term(f);
                let x = self.term(x);
                match f {
                    Term::Fn(p, b) => self.subst(&p.name.id, x, &b),
                    _ => Term::app(f, x),
                }
            }
            Term::Fn(p, b) => Term::fn_(self.param(p), self.term(b)),
            Term::FnType(p, b) => Term::fn_type(self.param(p), self.term(b)),
            Term::Univ => Term::Univ,
        }
    }

    /// Extends the environment with `id -> x` and normalizes `t` under it.
    pub fn subst(&mut self, id: &Id, x: Term, t: &Term) -> Term {
        self.env.insert(*id, x);
        let result = self.term(t);
        self.env.remove(id);
        result
    }

    /// Simulates applying `f` to `x`, performing β-reduction when `f`
    /// normalizes to a lambda; otherwise returns the stuck application.
    pub fn apply(&mut self, f: &Term, x: &Term) -> Term {
        self.term(&Term::app(f.clone(), x.clone()))
    }

    fn param(&mut self, p: &Param<Term>) -> Param<Term> {
        Param::new(p.name.clone(), self.term(&p.typ))
    }
}

/// Convenience wrapper for a one-shot normalization with no pre-existing
/// substitution environment.
pub fn normalize(ids: &mut Ids, term: &Term) -> Term {
    Normalizer::new(ids).term(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Var;

    #[test]
    fn beta_reduces_application_of_identity() {
        let mut ids = Ids::new();
        let x = Var::new("x", ids.next());
        // (|x| { x }) type  ~>  type
        let identity = Term::fn_(Param::new(x.clone(), Term::Univ), Term::Ref(x));
        let applied = Term::app(identity, Term::Univ);
        assert_eq!(normalize(&mut ids, &applied), Term::Univ);
    }

    #[test]
    fn stuck_application_on_non_function_is_unchanged() {
        let mut ids = Ids::new();
        let stuck = Term::app(Term::Univ, Term::Univ);
        assert_eq!(normalize(&mut ids, &stuck), stuck);
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut ids = Ids::new();
        let x = Var::new("x", ids.next());
        let identity = Term::fn_(Param::new(x.clone(), Term::Univ), Term::Ref(x));
        let applied = Term::app(identity, Term::Univ);
        let once = normalize(&mut ids, &applied);
        let twice = normalize(&mut ids, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn substitution_renames_to_avoid_capture() {
        let mut ids = Ids::new();
        let outer_x = Var::new("x", ids.next());
        let inner_x = Var::new("x", ids.next());
        // substituting `x` (outer) into `|x| { x }` (inner, shadowing) must not
        // let the inner binder capture the outer free reference.
        let inner_fn = Term::fn_(Param::new(inner_x.clone(), Term::Univ), Term::Ref(inner_x.clone()));
        let mut normalizer = Normalizer::new(&mut ids);
        let result = normalizer.subst(&outer_x.id, Term::Ref(outer_x.clone()), &inner_fn);
        match result {
            Term::Fn(p, body) => {
                assert_ne!(p.name.id, inner_x.id);
                match *body {
                    Term::Ref(v) => assert_eq!(v.id, p.name.id),
                    _ => panic!("expected Ref"),
                }
            }
            _ => panic!("expected Fn"),
        }
    }
}
