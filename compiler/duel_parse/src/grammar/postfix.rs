//! Range, unary and postfix levels.

use duel_ir::{BinaryOp, Expr, ExprKind, ListExpr, PostfixOp, StructOp, UntilOp};
use duel_lexer::TokenKind;
use duel_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// True if the current token can begin a unary operand.
    fn starts_unary(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Char(_)
                | TokenKind::String(_)
                | TokenKind::Ident(_)
                | TokenKind::Dollar(_)
                | TokenKind::Underscores(_)
                | TokenKind::If
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Star
                | TokenKind::Amp
        )
    }

    /// Parse `'..' unary | unary ('..' unary?)?`, then any number of
    /// tight `'@' unary` stop conditions.
    pub(crate) fn parse_range(&mut self) -> Result<Expr, ParseError> {
        let mut expr = if self.cursor.check(&TokenKind::DotDot) {
            let start = self.cursor.advance().span;
            let bound = self.parse_unary()?;
            let span = start.merge(bound.span);
            Expr::new(
                ExprKind::URange {
                    bound: Box::new(bound),
                    to: true,
                },
                span,
            )
        } else {
            let from = self.parse_unary()?;
            if self.cursor.eat(&TokenKind::DotDot) {
                if self.starts_unary() {
                    let to = self.parse_unary()?;
                    let span = from.span.merge(to.span);
                    Expr::new(
                        ExprKind::BiRange {
                            from: Box::new(from),
                            to: Box::new(to),
                        },
                        span,
                    )
                } else {
                    let span = from.span.merge(self.cursor.previous_span());
                    Expr::new(
                        ExprKind::URange {
                            bound: Box::new(from),
                            to: false,
                        },
                        span,
                    )
                }
            } else {
                from
            }
        };

        while self.cursor.eat(&TokenKind::At) {
            let right = self.parse_unary()?;
            let span = expr.span.merge(right.span);
            expr = Expr::new(
                ExprKind::Until {
                    op: UntilOp::At,
                    left: Box::new(expr),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(expr)
    }

    /// Parse prefix operators, then postfix.
    pub(crate) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_postfix();
        };
        let start = self.cursor.advance().span;
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// True at `[[` written without a gap.
    fn at_take_nth(&self) -> bool {
        let next = self.cursor.peek_next();
        self.cursor.check(&TokenKind::LBracket)
            && matches!(next.kind, TokenKind::LBracket)
            && self.cursor.current_span().touches(next.span)
    }

    /// Expect `]]` written without a gap.
    fn expect_take_nth_close(&mut self) -> Result<(), ParseError> {
        let next = self.cursor.peek_next();
        if self.cursor.check(&TokenKind::RBracket)
            && matches!(next.kind, TokenKind::RBracket)
            && self.cursor.current_span().touches(next.span)
        {
            self.cursor.advance();
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.cursor.make_expect_error("`]]`"))
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let start = expr.span;
            expr = match self.cursor.current_kind() {
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.cursor.check(&TokenKind::PlusPlus) {
                        PostfixOp::PostInc
                    } else {
                        PostfixOp::PostDec
                    };
                    let end = self.cursor.advance().span;
                    Expr::new(
                        ExprKind::Postfix {
                            op,
                            operand: Box::new(expr),
                        },
                        start.merge(end),
                    )
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let args = self.parse_call_args()?;
                    let end = self.cursor.expect(&TokenKind::RParen)?.span;
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        start.merge(end),
                    )
                }
                TokenKind::LBracket if self.at_take_nth() => {
                    self.cursor.advance();
                    self.cursor.advance();
                    let index = self.parse_list()?;
                    self.expect_take_nth_close()?;
                    let end = self.cursor.previous_span();
                    Expr::new(
                        ExprKind::TakeNth {
                            seq: Box::new(expr),
                            index: Box::new(index),
                        },
                        start.merge(end),
                    )
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self.parse_list()?;
                    let end = self.cursor.expect(&TokenKind::RBracket)?.span;
                    let mut indexed = Expr::binary(BinaryOp::Index, expr, index);
                    indexed.span = start.merge(end);
                    indexed
                }
                TokenKind::Dot | TokenKind::Arrow => {
                    let op = if self.cursor.check(&TokenKind::Dot) {
                        StructOp::Dot
                    } else {
                        StructOp::Arrow
                    };
                    self.cursor.advance();
                    let right = self.parse_primary()?;
                    let span = start.merge(right.span);
                    Expr::new(
                        ExprKind::Struct {
                            op,
                            left: Box::new(expr),
                            right: Box::new(right),
                        },
                        span,
                    )
                }
                TokenKind::LongArrow => {
                    self.cursor.advance();
                    let right = self.parse_primary()?;
                    let span = start.merge(right.span);
                    Expr::new(
                        ExprKind::StructWalk {
                            left: Box::new(expr),
                            right: Box::new(right),
                        },
                        span,
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Arguments between `(` and `)`, possibly none.
    fn parse_call_args(&mut self) -> Result<ListExpr, ParseError> {
        if self.cursor.check(&TokenKind::RParen) {
            return Ok(ListExpr::new(Vec::new()));
        }
        let first = self.parse_grouping()?;
        self.parse_list_tail(first)
    }
}
