//! The unifier: structural α-equivalence modulo β. Called only on terms
//! that have already been normalized.

use crate::ast::Term;
use crate::id::Ids;
use crate::normalize::Normalizer;

/// Checks whether `lhs` and `rhs` are α-equivalent.
///
/// `Ref`/`Ref` compares `id` (binder identity); `text` is compared too as a
/// defensive assertion, though it carries no semantic weight since `id`
/// already uniquely identifies the binder. Lambda parameter types are not
/// compared when unifying two `Fn`s — this is sound only because the
/// elaborator has already unified the surrounding Π-type both lambdas were
/// checked against.
pub fn unify(ids: &mut Ids, lhs: &Term, rhs: &Term) -> bool {
    match (lhs, rhs) {
        (Term::Ref(x), Term::Ref(y)) => x.id == y.id && x.text == y.text,
        (Term::App(f, x), Term::App(g, y)) => unify(ids, f, g) && unify(ids, x, y),
        (Term::Fn(p, b), Term::Fn(q, c)) => {
            let c = Normalizer::new(ids).subst(&q.name.id, Term::Ref(p.name.clone()), c);
            unify(ids, b, &c)
        }
        (Term::FnType(p, b), Term::FnType(q, c)) => {
            if !unify(ids, &p.typ, &q.typ) {
                return false;
            }
            let c = Normalizer::new(ids).subst(&q.name.id, Term::Ref(p.name.clone()), c);
            unify(ids, b, &c)
        }
        (Term::Univ, Term::Univ) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Var;
    use crate::syntax::Param;

    #[test]
    fn unify_is_reflexive() {
        let mut ids = Ids::new();
        let x = Var::new("x", ids.next());
        let term = Term::fn_(Param::new(x.clone(), Term::Univ), Term::Ref(x));
        assert!(unify(&mut ids, &term, &term));
    }

    #[test]
    fn unify_ignores_parameter_names_alpha_equivalence() {
        let mut ids = Ids::new();
        let a = Var::new("a", ids.next());
        let b = Var::new("b", ids.next());
        let lhs = Term::fn_type(Param::new(a.clone(), Term::Univ), Term::Ref(a));
        let rhs = Term::fn_type(Param::new(b.clone(), Term::Univ), Term::Ref(b));
        assert!(unify(&mut ids, &lhs, &rhs));
        assert!(unify(&mut ids, &rhs, &lhs));
    }

    #[test]
    fn unify_rejects_different_universes_of_shape() {
        let mut ids = Ids::new();
        let a = Var::new("a", ids.next());
        let param = Param::new(a.clone(), Term::Univ);
        let fn_type = Term::fn_type(param, Term::Univ);
        assert!(!unify(&mut ids, &fn_type, &Term::Univ));
        assert!(!unify(&mut ids, &Term::Univ, &fn_type));
    }
}
