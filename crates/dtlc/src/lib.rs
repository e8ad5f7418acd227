//! A type checker ("elaborator") for a tiny dependently-typed functional
//! language: Π-types, λ-abstractions, and a single, deliberately
//! inconsistent self-typed universe `type : type`.
//!
//! The pipeline is a strict sequence of stages, each consuming the
//! previous stage's output: lex → parse → resolve → elaborate → print.
//! Every stage threads the same [`id::Ids`] counter, so every binder in
//! the whole run (including ones synthesized by the renamer) carries a
//! globally unique [`id::Id`] and capture is structurally impossible.

pub mod ast;
pub mod cst;
pub mod elaborate;
pub mod error;
pub mod id;
pub mod lexer;
pub mod loc;
pub mod normalize;
pub mod parser;
pub mod print;
pub mod rename;
pub mod resolve;
pub mod syntax;
pub mod unify;

use ast::Term;
use error::Error;
use id::Ids;
use syntax::Def;

/// Runs the full pipeline — parse, resolve, elaborate — over `source`,
/// starting from a fresh identifier factory.
///
/// This is the one entry point the CLI needs; library consumers wanting
/// access to intermediate stages (the CST, the resolved-but-unelaborated
/// tree) should call `parser::parse`/`resolve::resolve`/`elaborate::elaborate`
/// directly.
pub fn run(source: &str) -> Result<Vec<Def<Term>>, Error> {
    let mut ids = Ids::new();
    let parsed = parser::parse(&mut ids, source)?;
    let resolved = resolve::resolve(parsed)?;
    elaborate::elaborate(&mut ids, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn runs_the_full_pipeline_on_the_identity_function() {
        let defs = run("fn id (a: type) (x: a) -> a { x }").expect("should elaborate");
        assert_eq!(print::display_program(&defs), "fn id(a: type) (x: a) -> a {\n\tx\n}");
    }

    #[test]
    fn reports_the_first_error_and_nothing_else() {
        let err = run("fn bad -> type { y }").unwrap_err();
        assert_eq!(err.to_string(), "1:18: unresolved variable 'y'");
    }
}
