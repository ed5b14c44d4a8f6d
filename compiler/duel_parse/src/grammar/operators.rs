//! Operator matching helpers and the C binary operator cascade.

use duel_ir::{BinaryOp, Expr, FilterOp, UnaryOp};
use duel_lexer::TokenKind;

use crate::{ParseError, Parser};

type Level<'p> = fn(&mut Parser<'p>) -> Result<Expr, ParseError>;

impl<'p> Parser<'p> {
    pub(crate) fn match_filter_op(&self) -> Option<FilterOp> {
        match self.cursor.current_kind() {
            TokenKind::EqEqQuestion => Some(FilterOp::Eq),
            TokenKind::NotEqQuestion => Some(FilterOp::NotEq),
            TokenKind::LtQuestion => Some(FilterOp::Lt),
            TokenKind::LtEqQuestion => Some(FilterOp::LtEq),
            TokenKind::GtQuestion => Some(FilterOp::Gt),
            TokenKind::GtEqQuestion => Some(FilterOp::GtEq),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Star => Some(UnaryOp::Deref),
            TokenKind::Amp => Some(UnaryOp::AddrOf),
            TokenKind::PlusPlus => Some(UnaryOp::PreInc),
            TokenKind::MinusMinus => Some(UnaryOp::PreDec),
            _ => None,
        }
    }

    fn match_lor_op(&self) -> Option<BinaryOp> {
        matches!(self.cursor.current_kind(), TokenKind::PipePipe).then_some(BinaryOp::Or)
    }

    fn match_land_op(&self) -> Option<BinaryOp> {
        matches!(self.cursor.current_kind(), TokenKind::AmpAmp).then_some(BinaryOp::And)
    }

    fn match_bitor_op(&self) -> Option<BinaryOp> {
        matches!(self.cursor.current_kind(), TokenKind::Pipe).then_some(BinaryOp::BitOr)
    }

    fn match_bitxor_op(&self) -> Option<BinaryOp> {
        matches!(self.cursor.current_kind(), TokenKind::Caret).then_some(BinaryOp::BitXor)
    }

    fn match_bitand_op(&self) -> Option<BinaryOp> {
        matches!(self.cursor.current_kind(), TokenKind::Amp).then_some(BinaryOp::BitAnd)
    }

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_shift_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Shl => Some(BinaryOp::Shl),
            TokenKind::Shr => Some(BinaryOp::Shr),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    /// One left-associative binary level: `next (op next)*`.
    fn parse_binary_level(
        &mut self,
        next: Level<'p>,
        matcher: fn(&Self) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = matcher(self) {
            self.cursor.advance();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            let mut expr = Expr::binary(op, left, right);
            expr.span = span;
            left = expr;
        }
        Ok(left)
    }

    /// Parse `||` (loosest C operator).
    pub(crate) fn parse_lor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_land, Self::match_lor_op)
    }

    fn parse_land(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitor, Self::match_land_op)
    }

    fn parse_bitor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitxor, Self::match_bitor_op)
    }

    fn parse_bitxor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitand, Self::match_bitxor_op)
    }

    fn parse_bitand(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, Self::match_bitand_op)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_comparison, Self::match_equality_op)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_shift, Self::match_comparison_op)
    }

    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, Self::match_shift_op)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, Self::match_additive_op)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_range, Self::match_multiplicative_op)
    }
}
