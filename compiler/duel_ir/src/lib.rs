//! Duel IR: the expression tree of the duel query language.
//!
//! - [`Span`] for source locations
//! - operator enums ([`BinaryOp`], [`UnaryOp`], [`FilterOp`], …)
//! - [`Literal`] constants
//! - [`Expr`] / [`ExprKind`], the node kinds evaluated by `duel_eval`
//! - the [`label`] templates shared by static names and result labels

pub mod ast;
pub mod label;
mod literal;
mod ops;
mod span;

pub use ast::{Builtin, Expr, ExprKind, Ident, IdentKind, ListExpr};
pub use literal::{Literal, LiteralValue};
pub use ops::{
    eager_prefix, lazy_prefix, BinaryOp, EagerFold, FilterOp, FoldSpelling, LazyFold, PostfixOp,
    StructOp, TernaryForm, UnaryOp, UntilOp,
};
pub use span::Span;
