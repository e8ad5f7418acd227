//! Renders elaborated terms and definitions in the textual form consumed
//! by the CLI: `Ref → text`, `Univ → "type"`, `Fn(p, b) → "|<p>| { <b> }"`,
//! `FnType(p, b) → "<p> -> <b>"`, `App(f, x) → "(<f> <x>)"`, and parameters
//! as `"(<name>: <type>)"`.

use std::fmt;

use crate::ast::Term;
use crate::syntax::{Def, Param};

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Ref(v) => write!(f, "{}", v.text),
            Term::Univ => write!(f, "type"),
            Term::Fn(p, b) => write!(f, "|{p}| {{ {b} }}"),
            Term::FnType(p, b) => write!(f, "{p} -> {b}"),
            Term::App(fun, x) => write!(f, "({fun} {x})"),
        }
    }
}

impl fmt::Display for Param<Term> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {})", self.name.text, self.typ)
    }
}

impl fmt::Display for Def<Term> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}", self.name.text)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        writeln!(f, " -> {} {{", self.ret)?;
        writeln!(f, "\t{}", self.body)?;
        write!(f, "}}")
    }
}

/// Convenience for rendering a single term, used throughout error messages
/// and tests.
#[must_use]
pub fn display_term(term: &Term) -> String {
    term.to_string()
}

/// Renders a whole elaborated program: each `Def` separated by a blank
/// line, matching the CLI's required output form.
#[must_use]
pub fn display_program(defs: &[Def<Term>]) -> String {
    defs.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n")
}
