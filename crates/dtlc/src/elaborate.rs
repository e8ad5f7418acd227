//! The bidirectional elaborator: consumes resolved CST definitions and
//! produces well-typed AST definitions, maintaining a globals map of
//! already-elaborated definitions and a locals map of in-scope variable
//! types under strict guard/restore discipline.

use crate::ast::{self, Globals, Locals, Term};
use crate::cst;
use crate::error::Error;
use crate::id::Ids;
use crate::normalize::Normalizer;
use crate::print::display_term;
use crate::rename;
use crate::syntax::{Def, Param};
use crate::unify::unify;

/// Elaborates every definition in `defs` in source order, threading a
/// shared globals map forward so each definition sees exactly the globals
/// produced by strictly earlier definitions (no mutual recursion).
pub fn elaborate(ids: &mut Ids, defs: Vec<Def<cst::Expr>>) -> Result<Vec<Def<Term>>, Error> {
    let mut elaborator = Elaborator::new(ids);
    let mut out = Vec::with_capacity(defs.len());
    for d in defs {
        out.push(elaborator.elaborate_def(d)?);
    }
    Ok(out)
}

struct Elaborator<'a> {
    ids: &'a mut Ids,
    globals: Globals,
    locals: Locals,
}

impl<'a> Elaborator<'a> {
    fn new(ids: &'a mut Ids) -> Self {
        Self { ids, globals: Globals::new(), locals: Locals::new() }
    }

    fn elaborate_def(&mut self, d: Def<cst::Expr>) -> Result<Def<Term>, Error> {
        let mut params = Vec::with_capacity(d.params.len());
        let mut bound = Vec::with_capacity(d.params.len());
        for p in d.params {
            let typ = self.check(p.typ, &Term::Univ)?;
            self.locals.insert(p.name.id, typ.clone());
            bound.push(p.name.id);
            params.push(Param::new(p.name, typ));
        }
        let ret = self.check(d.ret, &Term::Univ)?;
        let body = self.check(d.body, &ret)?;
        for id in bound {
            self.locals.remove(&id);
        }
        let checked = Def { loc: d.loc, name: d.name, params, ret, body };
        self.globals.insert(checked.name.id, checked.clone());
        Ok(checked)
    }

    /// `check(e, expected_type) -> Term`. The one case with special
    /// treatment is a bare lambda: its expected type is normalized and must
    /// be a `FnType`, and the lambda's parameter adopts that Π's parameter
    /// type rather than being separately checked. Everything else falls
    /// through to `infer` plus a unification against `expected_type`.
    fn check(&mut self, e: cst::Expr, expected_type: &Term) -> Result<Term, Error> {
        match e {
            cst::Expr::Fn(loc, v, body) => {
                let expected_nf = self.nf().term(expected_type);
                match expected_nf {
                    Term::FnType(p, b) => {
                        let body_type = self.nf().subst(&p.name.id, Term::Ref(v.clone()), &b);
                        let param = Param::new(v, p.typ);
                        let checked_body = self.guarded_check(&param, *body, &body_type)?;
                        Ok(Term::fn_(param, checked_body))
                    }
                    other => Err(Error::NotAFunctionLambda {
                        loc,
                        expected: display_term(&other),
                    }),
                }
            }
            e => {
                let loc = e.loc();
                let (tm, got) = self.infer(e)?;
                let got = self.nf().term(&got);
                let expected = self.nf().term(expected_type);
                if unify(self.ids, &got, &expected) {
                    Ok(tm)
                } else {
                    Err(Error::TypeMismatch {
                        loc,
                        expected: display_term(&expected),
                        got: display_term(&got),
                    })
                }
            }
        }
    }

    /// `infer(e) -> (Term, Term)`.
    fn infer(&mut self, e: cst::Expr) -> Result<(Term, Term), Error> {
        match e {
            cst::Expr::Resolved(_, v) => {
                if let Some(typ) = self.locals.get(&v.id).cloned() {
                    return Ok((Term::Ref(v), typ));
                }
                let def = self
                    .globals
                    .get(&v.id)
                    .unwrap_or_else(|| unreachable!("resolved reference to an unknown binder"))
                    .clone();
                let value = self.rename(&ast::to_value(&def));
                let typ = self.rename(&ast::to_type(&def));
                Ok((value, typ))
            }
            cst::Expr::FnType(_, p, b) => {
                let (p_typ, _) = self.infer(p.typ)?;
                let checked_p = Param::new(p.name, p_typ);
                let (b_tm, b_ty) = self.guarded_infer(&checked_p, *b)?;
                Ok((Term::fn_type(checked_p, b_tm), b_ty))
            }
            cst::Expr::App(_, f, x) => {
                let f_loc = f.loc();
                let (f_tm, f_typ) = self.infer(*f)?;
                match f_typ {
                    Term::FnType(p, b) => {
                        let x_tm = self.guarded_check(&p, *x, &p.typ)?;
                        let typ = self.nf().subst(&p.name.id, x_tm.clone(), &b);
                        let tm = self.nf().apply(&f_tm, &x_tm);
                        Ok((tm, typ))
                    }
                    other => Err(Error::NotAFunctionApplication {
                        loc: f_loc,
                        got: display_term(&other),
                    }),
                }
            }
            cst::Expr::Univ(_) => Ok((Term::Univ, Term::Univ)),
            cst::Expr::Fn(loc, ..) => {
                unreachable!("bare lambda at {loc:?} must go through check, never infer")
            }
            cst::Expr::Unresolved(..) => unreachable!("unresolved reference reached the elaborator"),
        }
    }

    fn guarded_check(&mut self, p: &Param<Term>, e: cst::Expr, typ: &Term) -> Result<Term, Error> {
        self.locals.insert(p.name.id, p.typ.clone());
        let result = self.check(e, typ);
        self.locals.remove(&p.name.id);
        result
    }

    fn guarded_infer(&mut self, p: &Param<Term>, e: cst::Expr) -> Result<(Term, Term), Error> {
        self.locals.insert(p.name.id, p.typ.clone());
        let result = self.infer(e);
        self.locals.remove(&p.name.id);
        result
    }

    fn nf(&mut self) -> Normalizer<'_> {
        Normalizer::new(self.ids)
    }

    fn rename(&mut self, tm: &Term) -> Term {
        rename::rename(self.ids, tm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Ids;
    use crate::loc::Loc;
    use crate::parser::parse;
    use crate::resolve::resolve;

    fn elaborate_source(source: &str) -> Result<Vec<Def<Term>>, Error> {
        let mut ids = Ids::new();
        let parsed = parse(&mut ids, source)?;
        let resolved = resolve(parsed)?;
        elaborate(&mut ids, resolved)
    }

    #[test]
    fn scenario_1_identity_function() {
        let defs = elaborate_source("fn id (a: type) (x: a) -> a { x }").expect("should elaborate");
        assert_eq!(defs.len(), 1);
        assert_eq!(display_term(&defs[0].body), "x");
    }

    #[test]
    fn scenario_2_apply_identity_at_the_universe() {
        let defs = elaborate_source(
            "fn id (a: type) (x: a) -> a { x }\nfn u -> type { ((id type) type) }",
        )
        .expect("should elaborate");
        assert_eq!(defs.len(), 2);
        let mut ids = Ids::new();
        let normalized = crate::normalize::normalize(&mut ids, &defs[1].body);
        assert_eq!(normalized, Term::Univ);
    }

    #[test]
    fn scenario_3_unresolved_variable() {
        let err = elaborate_source("fn bad -> type { y }").unwrap_err();
        match err {
            Error::UnresolvedVariable { loc, name } => {
                assert_eq!(name, "y");
                assert_eq!((loc.line, loc.col), (1, 18));
            }
            other => panic!("expected UnresolvedVariable, got {other:?}"),
        }
    }

    #[test]
    fn scenario_4_duplicate_definition() {
        let err = elaborate_source("fn a -> type { type }\nfn a -> type { type }").unwrap_err();
        match err {
            Error::DuplicateName { name, .. } => assert_eq!(name, "a"),
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn scenario_5_type_mismatch_on_lambda() {
        let err = elaborate_source("fn bad -> type { |x| { x } }").unwrap_err();
        match err {
            Error::NotAFunctionLambda { expected, .. } => assert_eq!(expected, "type"),
            other => panic!("expected NotAFunctionLambda, got {other:?}"),
        }
    }

    #[test]
    fn scenario_6_application_of_non_function() {
        let err = elaborate_source("fn bad -> type { (type type) }").unwrap_err();
        match err {
            Error::NotAFunctionApplication { got, .. } => assert_eq!(got, "type"),
            other => panic!("expected NotAFunctionApplication, got {other:?}"),
        }
    }

    #[test]
    fn no_partial_definition_survives_a_failed_elaboration() {
        let mut ids = Ids::new();
        let parsed = parse(&mut ids, "fn bad -> type { y }").expect("should parse");
        let resolved = resolve(parsed).expect("should resolve");
        let mut elaborator = Elaborator::new(&mut ids);
        assert!(elaborator.elaborate_def(resolved.into_iter().next().unwrap()).is_err());
        assert!(elaborator.globals.is_empty());
        assert!(elaborator.locals.is_empty());
    }

    #[test]
    fn failure_location_is_preserved() {
        let err = elaborate_source("fn bad -> type { (type type) }").unwrap_err();
        assert_eq!(err.loc(), Loc { pos: 18, line: 1, col: 19 });
    }
}
