//! Expression grammar.
//!
//! - `mod.rs`: the duel-specific levels, from statement down to ternary
//! - `operators.rs`: operator matching and the C binary cascade
//! - `postfix.rs`: unary, range and postfix levels
//! - `primary.rs`: literals, names and bracketed forms

mod operators;
mod postfix;
mod primary;

use duel_ir::{
    EagerFold, Expr, ExprKind, FoldSpelling, LazyFold, ListExpr, TernaryForm, UntilOp,
};
use duel_lexer::TokenKind;
use duel_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// A grouping prefix recognised at the current token.
enum Grouping {
    Eager(EagerFold),
    Lazy(LazyFold),
}

impl Parser<'_> {
    /// Parse `list (';' list)*`. A trailing `;` is accepted and ignored.
    pub(crate) fn parse_statement(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_list()?;
        if !self.cursor.check(&TokenKind::Semicolon) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.cursor.eat(&TokenKind::Semicolon) {
            if self.at_group_end() {
                break;
            }
            items.push(self.parse_list()?);
        }

        if items.len() == 1 {
            return Ok(items.remove(0));
        }
        let span = items[0].span.merge(self.cursor.previous_span());
        Ok(Expr::new(ExprKind::Statement(items), span))
    }

    fn at_group_end(&self) -> bool {
        matches!(
            self.cursor.current_kind(),
            TokenKind::Eof | TokenKind::RParen | TokenKind::RBrace
        )
    }

    /// Parse `grouping (',' grouping)*`.
    pub(crate) fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_grouping()?;
        if !self.cursor.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let list = self.parse_list_tail(first)?;
        let span = list.items[0]
            .span
            .merge(list.items[list.items.len() - 1].span);
        Ok(Expr::new(ExprKind::List(list), span))
    }

    /// Comma-separated items following an already parsed first item.
    pub(crate) fn parse_list_tail(&mut self, first: Expr) -> Result<ListExpr, ParseError> {
        let mut items = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            items.push(self.parse_grouping()?);
        }
        Ok(ListExpr::new(items))
    }

    fn match_grouping(&self) -> Option<(Grouping, FoldSpelling)> {
        let symbol = match self.cursor.current_kind() {
            TokenKind::PlusSlash => Some(Grouping::Eager(EagerFold::Sum)),
            TokenKind::HashSlash => Some(Grouping::Eager(EagerFold::Count)),
            TokenKind::AmpAmpSlash => Some(Grouping::Lazy(LazyFold::All)),
            TokenKind::PipePipeSlash => Some(Grouping::Lazy(LazyFold::Any)),
            _ => None,
        };
        if let Some(grouping) = symbol {
            return Some((grouping, FoldSpelling::Symbol));
        }

        // `sum x` is a reduction, `sum + 1` is a variable named sum.
        let TokenKind::Ident(name) = self.cursor.current_kind() else {
            return None;
        };
        if !self.cursor.peek_next().kind.starts_operand() {
            return None;
        }
        let keyword = match name.as_str() {
            "sum" => Grouping::Eager(EagerFold::Sum),
            "count" => Grouping::Eager(EagerFold::Count),
            "all" => Grouping::Lazy(LazyFold::All),
            "any" => Grouping::Lazy(LazyFold::Any),
            _ => return None,
        };
        Some((keyword, FoldSpelling::Keyword))
    }

    fn parse_grouping(&mut self) -> Result<Expr, ParseError> {
        let Some((grouping, spelling)) = self.match_grouping() else {
            return self.parse_foreach();
        };
        let start = self.cursor.advance().span;
        let operand = Box::new(ensure_sufficient_stack(|| self.parse_grouping())?);
        let span = start.merge(operand.span);
        let kind = match grouping {
            Grouping::Eager(fold) => ExprKind::EagerGrouping {
                fold,
                spelling,
                operand,
            },
            Grouping::Lazy(fold) => ExprKind::LazyGrouping {
                fold,
                spelling,
                operand,
            },
        };
        Ok(Expr::new(kind, span))
    }

    /// Parse `enumerate ('=>' enumerate)*`.
    fn parse_foreach(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_enumerate()?;
        while self.cursor.eat(&TokenKind::FatArrow) {
            let right = self.parse_enumerate()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Foreach {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// Parse `alias ('#' alias)*`.
    fn parse_enumerate(&mut self) -> Result<Expr, ParseError> {
        let mut seq = self.parse_alias()?;
        while self.cursor.eat(&TokenKind::Hash) {
            let index_name = self.parse_alias()?;
            let span = seq.span.merge(index_name.span);
            seq = Expr::new(
                ExprKind::Enumerate {
                    seq: Box::new(seq),
                    index_name: Box::new(index_name),
                },
                span,
            );
        }
        Ok(seq)
    }

    /// Parse `until (':=' alias)?`.
    fn parse_alias(&mut self) -> Result<Expr, ParseError> {
        let name = self.parse_until()?;
        if !self.cursor.eat(&TokenKind::ColonEq) {
            return Ok(name);
        }
        let value = ensure_sufficient_stack(|| self.parse_alias())?;
        let span = name.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Alias {
                name: Box::new(name),
                value: Box::new(value),
            },
            span,
        ))
    }

    /// Parse `filter ('@@' filter)*`.
    fn parse_until(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_filter()?;
        while self.cursor.eat(&TokenKind::AtAt) {
            let right = self.parse_filter()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Until {
                    op: UntilOp::AtAt,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// Parse `ternary (filter-op ternary)*`.
    fn parse_filter(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_ternary()?;
        while let Some(op) = self.match_filter_op() {
            self.cursor.advance();
            let right = self.parse_ternary()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Filter {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// Parse `lor ('?' list ':' ternary)?`.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_lor()?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(cond);
        }
        let then = self.parse_list()?;
        self.cursor.expect(&TokenKind::Colon)?;
        let otherwise = ensure_sufficient_stack(|| self.parse_ternary())?;
        let span = cond.span.merge(otherwise.span);
        Ok(Expr::new(
            ExprKind::Ternary {
                form: TernaryForm::Conditional,
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Some(Box::new(otherwise)),
            },
            span,
        ))
    }
}
