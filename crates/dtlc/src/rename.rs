//! The renamer: produces a fresh α-variant of an AST term, assigning new
//! ids to every bound variable and rewriting references accordingly.
//!
//! This is the sole mechanism that prevents variable capture. Any time a
//! term is substituted out of its original binding site — notably when a
//! global definition is inlined during type inference, or when the
//! normalizer performs a β-step — it must first be renamed so that its
//! binders cannot collide with ambient binders.

use std::collections::HashMap;

use crate::ast::Term;
use crate::id::{Id, Ids, Var};
use crate::syntax::Param;

/// Produces an α-equivalent copy of `term`, giving every binder a fresh id
/// via `ids` and rewriting bound references to match. Free references
/// (e.g. to global definitions) are left unchanged.
pub fn rename(ids: &mut Ids, term: &Term) -> Term {
    Renamer { ids, subst: HashMap::new() }.term(term)
}

struct Renamer<'a> {
    ids: &'a mut Ids,
    subst: HashMap<Id, Id>,
}

impl Renamer<'_> {
    fn term(&mut self, term: &Term) -> Term {
        match term {
            Term::Ref(v) => match self.subst.get(&v.id) {
                Some(&new_id) => Term::Ref(Var::new(v.text.clone(), new_id)),
                None => term.clone(),
            },
            Term::App(f, x) => Term::app(self.term(f), self.term(x)),
            Term::Fn(p, b) => Term::fn_(self.param(p), self.term(b)),
            Term::FnType(p, b) => Term::fn_type(self.param(p), self.term(b)),
            Term::Univ => Term::Univ,
        }
    }

    fn param(&mut self, p: &Param<Term>) -> Param<Term> {
        let name = self.ids.rename(&p.name);
        self.subst.insert(p.name.id, name.id);
        Param::new(name, self.term(&p.typ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::display_term;

    #[test]
    fn renames_bound_variable_but_not_free_one() {
        let mut ids = Ids::new();
        let free_id = ids.next();
        let x_id = ids.next();
        let x = Var::new("x", x_id);
        // |x| { (free x) }
        let term = Term::fn_(
            Param::new(x.clone(), Term::Univ),
            Term::app(Term::Ref(Var::new("free", free_id)), Term::Ref(x.clone())),
        );
        let renamed = rename(&mut ids, &term);
        match &renamed {
            Term::Fn(p, body) => {
                assert_ne!(p.name.id, x_id);
                match body.as_ref() {
                    Term::App(f, arg) => {
                        match f.as_ref() {
                            Term::Ref(v) => assert_eq!(v.id, free_id),
                            _ => panic!("expected Ref"),
                        }
                        match arg.as_ref() {
                            Term::Ref(v) => assert_eq!(v.id, p.name.id),
                            _ => panic!("expected Ref"),
                        }
                    }
                    _ => panic!("expected App"),
                }
            }
            _ => panic!("expected Fn"),
        }
        // The rendered text is the same up to variable identity.
        assert_eq!(display_term(&term), display_term(&renamed));
    }
}
