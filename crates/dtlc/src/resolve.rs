//! The resolver: walks the CST, converting every `Unresolved` reference
//! into a `Resolved` one carrying the id of the binder it refers to.
//! Rejects duplicate top-level names and unbound variables.

use std::collections::{HashMap, HashSet};

use crate::cst::Expr;
use crate::error::Error;
use crate::id::Var;
use crate::syntax::{Def, Param};

/// Resolves every definition in `defs` in order, returning the same
/// definitions with every reference rewritten to `Resolved`.
///
/// Each definition's top-level name becomes visible to every definition
/// that follows it (so later definitions may reference earlier ones), but
/// not to itself or to earlier definitions (no mutual/self recursion).
pub fn resolve(defs: Vec<Def<Expr>>) -> Result<Vec<Def<Expr>>, Error> {
    let mut resolver = Resolver::default();
    defs.into_iter().map(|d| resolver.resolve_def(d)).collect()
}

#[derive(Default)]
struct Resolver {
    scope: HashMap<String, Var>,
    names: HashSet<String>,
}

impl Resolver {
    fn resolve_def(&mut self, d: Def<Expr>) -> Result<Def<Expr>, Error> {
        let mut recoverable = Vec::new();
        let mut removable = Vec::new();
        let mut params = Vec::with_capacity(d.params.len());

        for p in d.params {
            let typ = self.resolve_expr(p.typ)?;
            match self.insert(p.name.clone()) {
                Some(old) => recoverable.push(old),
                None => removable.push(p.name.clone()),
            }
            params.push(Param::new(p.name, typ));
        }

        let ret = self.resolve_expr(d.ret)?;
        let body = self.resolve_expr(d.body)?;

        for v in removable {
            self.scope.remove(&v.text);
        }
        for v in recoverable {
            self.insert(v);
        }

        if self.names.contains(&d.name.text) {
            return Err(Error::DuplicateName { loc: d.loc, name: d.name.text.clone() });
        }
        self.names.insert(d.name.text.clone());
        self.insert(d.name.clone());

        Ok(Def { loc: d.loc, name: d.name, params, ret, body })
    }

    fn resolve_expr(&mut self, e: Expr) -> Result<Expr, Error> {
        match e {
            Expr::Unresolved(loc, v) => match self.scope.get(&v.text) {
                Some(bound) => Ok(Expr::Resolved(loc, bound.clone())),
                None => Err(Error::UnresolvedVariable { loc, name: v.text }),
            },
            Expr::Fn(loc, v, body) => {
                let body = self.guard(v.clone(), *body)?;
                Ok(Expr::Fn(loc, v, Box::new(body)))
            }
            Expr::App(loc, f, x) => {
                let f = self.resolve_expr(*f)?;
                let x = self.resolve_expr(*x)?;
                Ok(Expr::App(loc, Box::new(f), Box::new(x)))
            }
            Expr::FnType(loc, p, body) => {
                let typ = self.resolve_expr(p.typ)?;
                let body = self.guard(p.name.clone(), *body)?;
                Ok(Expr::FnType(loc, Box::new(Param::new(p.name, typ)), Box::new(body)))
            }
            Expr::Univ(loc) => Ok(Expr::Univ(loc)),
            Expr::Resolved(..) => unreachable!("resolver runs at most once per tree"),
        }
    }

    /// Inserts `v` into scope, resolves `e` under it, then restores the
    /// scope to what it was before `v` was inserted — either the shadowed
    /// binding or nothing.
    fn guard(&mut self, v: Var, e: Expr) -> Result<Expr, Error> {
        let old = self.insert(v.clone());
        let result = self.resolve_expr(e);
        match old {
            Some(old) => {
                self.insert(old);
            }
            None => {
                self.scope.remove(&v.text);
            }
        }
        result
    }

    /// Inserts `v` as the most recent binder for its text, returning
    /// whatever binder it shadows, if any.
    fn insert(&mut self, v: Var) -> Option<Var> {
        self.scope.insert(v.text.clone(), v)
    }
}
