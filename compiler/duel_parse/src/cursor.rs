//! Token cursor for navigating the token stream.

use std::mem::discriminant;

use duel_ir::Span;
use duel_lexer::{Token, TokenKind};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};

/// Cursor over a token slice whose last element is always `Eof`.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    fn token_at(&self, pos: usize) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[pos.min(last)]
    }

    #[inline]
    pub(crate) fn current(&self) -> &'a Token {
        self.token_at(self.pos)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Token after the current one; `Eof` at the end.
    #[inline]
    pub(crate) fn peek_next(&self) -> &'a Token {
        self.token_at(self.pos + 1)
    }

    #[inline]
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.token_at(self.pos - 1).span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token's kind, ignoring any payload.
    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    /// Consume the current token. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.current();
        trace!(
            pos = self.pos,
            kind = %token.kind,
            span_start = token.span.start,
            span_end = token.span.end,
            "advance"
        );
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind.display_name()))
        }
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn make_expect_error(&self, expected: &str) -> ParseError {
        let current = self.current_kind();
        let kind = match current {
            TokenKind::Eof => ParseErrorKind::UnexpectedEof,
            TokenKind::Error => ParseErrorKind::LexError,
            _ => ParseErrorKind::UnexpectedToken,
        };
        ParseError::new(
            kind,
            format!("expected {expected}, found {}", current.display_name()),
            self.current_span(),
        )
        .with_expected(expected)
    }
}
