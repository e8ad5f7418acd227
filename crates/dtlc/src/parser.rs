//! A hand-written, predictive (single-token-of-lookahead, plus one extra
//! peek to disambiguate a parameter from a parenthesized expression)
//! recursive-descent parser over the source grammar. Produces the CST of
//! `crate::cst`, giving every parsed identifier (binder or reference) a
//! fresh id immediately as it is parsed.

use logos::Logos;

use crate::cst::Expr;
use crate::error::Error;
use crate::id::{Ids, Var};
use crate::lexer::{self, Token};
use crate::loc::Loc;
use crate::syntax::{Def, Param};

/// Parses a whole source file into an ordered list of definitions.
pub fn parse(ids: &mut Ids, source: &str) -> Result<Vec<Def<Expr>>, Error> {
    Parser::new(ids, source)?.parse_program()
}

struct Parser<'a> {
    ids: &'a mut Ids,
    source: &'a str,
    tokens: Vec<(Token, std::ops::Range<usize>)>,
    pos: usize,
    line_starts: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn new(ids: &'a mut Ids, source: &'a str) -> Result<Self, Error> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(result) = lexer.next() {
            match result {
                Ok(token) => tokens.push((token, lexer.span())),
                Err(()) => {
                    let span = lexer.span();
                    let loc = loc_at(&lexer::line_starts(source), span.start);
                    return Err(Error::Parse {
                        loc,
                        message: format!("unexpected character '{}'", &source[span]),
                    });
                }
            }
        }
        let line_starts = lexer::line_starts(source);
        Ok(Self { ids, source, tokens, pos: 0, line_starts })
    }

    fn parse_program(&mut self) -> Result<Vec<Def<Expr>>, Error> {
        let mut defs = Vec::new();
        while self.peek_token().is_some() {
            defs.push(self.parse_def()?);
        }
        Ok(defs)
    }

    fn parse_def(&mut self) -> Result<Def<Expr>, Error> {
        let loc = self.loc();
        self.expect(Token::Fn)?;
        let name = self.parse_ident()?;
        let mut params = Vec::new();
        while self.peek_token() == Some(Token::LParen) {
            params.push(self.parse_param()?);
        }
        self.expect(Token::Arrow)?;
        let ret = self.parse_expr()?;
        self.expect(Token::LBrace)?;
        let body = self.parse_expr()?;
        self.expect(Token::RBrace)?;
        Ok(Def { loc, name, params, ret, body })
    }

    fn parse_param(&mut self) -> Result<Param<Expr>, Error> {
        self.expect(Token::LParen)?;
        let name = self.parse_ident()?;
        self.expect(Token::Colon)?;
        let typ = self.parse_expr()?;
        self.expect(Token::RParen)?;
        Ok(Param::new(name, typ))
    }

    fn parse_expr(&mut self) -> Result<Expr, Error> {
        match self.peek_token() {
            Some(Token::Pipe) => self.parse_fn(),
            Some(Token::LParen) if self.is_param_start() => self.parse_fn_type(),
            Some(Token::Type | Token::Ident | Token::LParen) => self.parse_app_or_primary(),
            Some(_) => Err(self.unexpected("an expression")),
            None => Err(self.unexpected_eof("an expression")),
        }
    }

    fn parse_fn(&mut self) -> Result<Expr, Error> {
        let loc = self.loc();
        self.expect(Token::Pipe)?;
        let v = self.parse_ident()?;
        self.expect(Token::Pipe)?;
        self.expect(Token::LBrace)?;
        let body = self.parse_expr()?;
        self.expect(Token::RBrace)?;
        Ok(Expr::Fn(loc, v, Box::new(body)))
    }

    fn parse_fn_type(&mut self) -> Result<Expr, Error> {
        let loc = self.loc();
        let param = self.parse_param()?;
        self.expect(Token::Arrow)?;
        let body = self.parse_expr()?;
        Ok(Expr::FnType(loc, Box::new(param), Box::new(body)))
    }

    /// `primary_expr expr` — a primary followed by a full expression forms
    /// an application; otherwise the primary stands alone. `expr`'s FIRST
    /// set is exactly `{Pipe, LParen, Type, Ident}`, so one token of
    /// lookahead after the primary is enough to decide.
    fn parse_app_or_primary(&mut self) -> Result<Expr, Error> {
        let loc = self.loc();
        let primary = self.parse_primary()?;
        if self.starts_expr() {
            let arg = self.parse_expr()?;
            Ok(Expr::App(loc, Box::new(primary), Box::new(arg)))
        } else {
            Ok(primary)
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, Error> {
        match self.peek_token() {
            Some(Token::Type) => {
                let loc = self.loc();
                self.bump();
                Ok(Expr::Univ(loc))
            }
            Some(Token::Ident) => {
                let loc = self.loc();
                let v = self.parse_ident()?;
                Ok(Expr::Unresolved(loc, v))
            }
            Some(Token::LParen) => {
                self.bump();
                let e = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(e)
            }
            Some(_) => Err(self.unexpected("an identifier, 'type', or '('")),
            None => Err(self.unexpected_eof("an identifier, 'type', or '('")),
        }
    }

    fn parse_ident(&mut self) -> Result<Var, Error> {
        let span = self.expect(Token::Ident)?;
        let text = &self.source[span];
        Ok(Var::new(text, self.ids.next()))
    }

    fn starts_expr(&self) -> bool {
        matches!(self.peek_token(), Some(Token::Pipe | Token::LParen | Token::Type | Token::Ident))
    }

    /// True if the token at `pos` is `(` and it is immediately followed by
    /// `ident :`, i.e. the start of a `param`, as opposed to a general
    /// parenthesized expression.
    fn is_param_start(&self) -> bool {
        self.token_at(self.pos + 1) == Some(Token::Ident) && self.token_at(self.pos + 2) == Some(Token::Colon)
    }

    fn peek_token(&self) -> Option<Token> {
        self.token_at(self.pos)
    }

    fn token_at(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).map(|(t, _)| *t)
    }

    fn bump(&mut self) -> Option<(Token, std::ops::Range<usize>)> {
        let entry = self.tokens.get(self.pos).cloned();
        if entry.is_some() {
            self.pos += 1;
        }
        entry
    }

    fn expect(&mut self, expected: Token) -> Result<std::ops::Range<usize>, Error> {
        match self.tokens.get(self.pos).cloned() {
            Some((tok, span)) if tok == expected => {
                self.pos += 1;
                Ok(span)
            }
            Some(_) => Err(self.unexpected(expected.describe())),
            None => Err(self.unexpected_eof(expected.describe())),
        }
    }

    fn loc(&self) -> Loc {
        let offset = self
            .tokens
            .get(self.pos)
            .map_or(self.source.len(), |(_, span)| span.start);
        loc_at(&self.line_starts, offset)
    }

    fn unexpected(&self, expected: &str) -> Error {
        let loc = self.loc();
        let got = self
            .tokens
            .get(self.pos)
            .map_or("end of input".to_string(), |(tok, _)| tok.describe().to_string());
        Error::Parse { loc, message: format!("expected {expected}, got {got}") }
    }

    fn unexpected_eof(&self, expected: &str) -> Error {
        let loc = self.loc();
        Error::Parse { loc, message: format!("expected {expected}, got end of input") }
    }
}

fn loc_at(line_starts: &[usize], offset: usize) -> Loc {
    let (line, col) = lexer::offset_to_line_col(line_starts, offset);
    Loc { pos: offset, line, col }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Ids;

    #[test]
    fn parses_identity_definition() {
        let mut ids = Ids::new();
        let defs = parse(&mut ids, "fn id (a: type) (x: a) -> a { x }").expect("should parse");
        assert_eq!(defs.len(), 1);
        let def = &defs[0];
        assert_eq!(def.name.text, "id");
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[0].name.text, "a");
        assert_eq!(def.params[1].name.text, "x");
    }

    #[test]
    fn parses_nested_application_right_associatively_without_parens() {
        let mut ids = Ids::new();
        // `(f x y)` with an outer paren to make it a single expr: parses as
        // App(f, App(x, y)) per the grammar's `primary_expr expr` rule.
        let defs = parse(&mut ids, "fn t -> type { (f x y) }").expect("should parse");
        match &defs[0].body {
            Expr::App(_, f, rest) => {
                match f.as_ref() {
                    Expr::Unresolved(_, v) => assert_eq!(v.text, "f"),
                    other => panic!("expected f, got {other:?}"),
                }
                match rest.as_ref() {
                    Expr::App(_, x, y) => {
                        match x.as_ref() {
                            Expr::Unresolved(_, v) => assert_eq!(v.text, "x"),
                            other => panic!("expected x, got {other:?}"),
                        }
                        match y.as_ref() {
                            Expr::Unresolved(_, v) => assert_eq!(v.text, "y"),
                            other => panic!("expected y, got {other:?}"),
                        }
                    }
                    other => panic!("expected inner App, got {other:?}"),
                }
            }
            other => panic!("expected App, got {other:?}"),
        }
    }

    #[test]
    fn distinguishes_param_from_parenthesized_expr() {
        let mut ids = Ids::new();
        let defs = parse(&mut ids, "fn t -> type { (type) }").expect("should parse");
        assert!(matches!(defs[0].body, Expr::Univ(_)));
    }

    #[test]
    fn reports_location_of_unexpected_token() {
        let mut ids = Ids::new();
        let err = parse(&mut ids, "fn bad -> type { ) }").unwrap_err();
        match err {
            Error::Parse { loc, .. } => assert_eq!((loc.line, loc.col), (1, 18)),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
