//! Primary expressions: literals, names and bracketed forms.

use duel_ir::{Expr, ExprKind, Ident, Literal, LiteralValue, TernaryForm};
use duel_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        let literal = |value| Literal::new(self.slice(span), value);

        let kind = match &token.kind {
            TokenKind::Int(n) => ExprKind::Literal(literal(LiteralValue::Int(*n))),
            TokenKind::Float(bits) => {
                ExprKind::Literal(literal(LiteralValue::Float(f64::from_bits(*bits))))
            }
            TokenKind::Char(c) => ExprKind::Literal(literal(LiteralValue::Char(*c))),
            TokenKind::String(s) => ExprKind::Literal(literal(LiteralValue::Str(s.clone()))),
            TokenKind::Ident(name) | TokenKind::Dollar(name) => {
                ExprKind::Ident(Ident::new(name.clone()))
            }
            TokenKind::Underscores(n) => ExprKind::Underscore(*n),
            TokenKind::LParen | TokenKind::LBrace => return self.parse_bracketed(),
            TokenKind::If => return self.parse_if(),
            TokenKind::Error => return Err(self.lex_error()),
            _ => return Err(self.cursor.make_expect_error("expression")),
        };
        self.cursor.advance();
        Ok(Expr::new(kind, span))
    }

    /// `( statement )` or `{ statement }`.
    fn parse_bracketed(&mut self) -> Result<Expr, ParseError> {
        let open = self.cursor.advance();
        let curly = matches!(open.kind, TokenKind::LBrace);
        let inner = Box::new(self.parse_statement()?);
        let close = if curly {
            TokenKind::RBrace
        } else {
            TokenKind::RParen
        };
        let end = self.cursor.expect(&close)?.span;
        let kind = if curly {
            ExprKind::Curlies(inner)
        } else {
            ExprKind::Parens(inner)
        };
        Ok(Expr::new(kind, open.span.merge(end)))
    }

    /// `if ( statement ) grouping (else grouping)?`
    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.parse_statement()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let then = self.parse_grouping()?;
        let otherwise = if self.cursor.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_grouping()?))
        } else {
            None
        };
        let end = otherwise.as_ref().map_or(then.span, |e| e.span);
        Ok(Expr::new(
            ExprKind::Ternary {
                form: TernaryForm::If,
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise,
            },
            start.merge(end),
        ))
    }

    pub(crate) fn lex_error(&self) -> ParseError {
        let span = self.cursor.current_span();
        let text = self.slice(span);
        if text.starts_with(['\'', '"']) || text.starts_with(|c: char| c.is_ascii_digit()) {
            ParseError::new(
                ParseErrorKind::InvalidLiteral,
                format!("invalid literal `{text}`"),
                span,
            )
        } else {
            ParseError::new(
                ParseErrorKind::LexError,
                format!("unrecognized input `{text}`"),
                span,
            )
        }
    }
}
