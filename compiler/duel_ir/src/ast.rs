//! The duel expression tree.
//!
//! A tree is built once by the parser and never reshaped. Two pieces of
//! evaluation state live inside it behind `Cell`s:
//!
//! - [`Ident`] remembers how its name was first resolved ([`IdentKind`]),
//!   so re-evaluating it inside a loop skips the lookup cascade.
//! - [`ListExpr`] records which element is currently producing, so that a
//!   surrounding `( )` can ask whether *that* element self-delimits.
//!
//! Children are boxed; no node is shared between two parents.

use std::cell::Cell;

use crate::literal::Literal;
use crate::ops::{
    BinaryOp, EagerFold, FilterOp, FoldSpelling, LazyFold, PostfixOp, StructOp, TernaryForm,
    UnaryOp, UntilOp,
};
use crate::span::Span;

/// Builtin functions and values reachable by name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    /// `sizeof(x)`: byte size of `x`.
    SizeOf,
    /// `frames_no`: number of frames on the call stack.
    FramesNo,
    /// `frame(n)`: the n-th frame, 0 = innermost.
    Frame,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sizeof" => Some(Self::SizeOf),
            "frames_no" => Some(Self::FramesNo),
            "frame" => Some(Self::Frame),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SizeOf => "sizeof",
            Self::FramesNo => "frames_no",
            Self::Frame => "frame",
        }
    }
}

/// How an identifier was resolved the first time it succeeded.
///
/// `depth` is an index from the bottom of the scope stack, i.e. it names the
/// same enclosing `->`/`=>`/`@` level on every later evaluation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IdentKind {
    ScopeField { depth: usize },
    Method { depth: usize },
    Symbol,
    Frame,
    Builtin(Builtin),
    RawFallback,
}

/// An identifier with its memoized resolution.
#[derive(Debug, Default)]
pub struct Ident {
    pub name: String,
    resolved: Cell<Option<IdentKind>>,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident {
            name: name.into(),
            resolved: Cell::new(None),
        }
    }

    #[inline]
    pub fn resolved(&self) -> Option<IdentKind> {
        self.resolved.get()
    }

    #[inline]
    pub fn remember(&self, kind: IdentKind) {
        self.resolved.set(Some(kind));
    }
}

impl Clone for Ident {
    fn clone(&self) -> Self {
        Ident::new(self.name.clone())
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// `a, b, c`
#[derive(Debug, Default)]
pub struct ListExpr {
    pub items: Vec<Expr>,
    active: Cell<usize>,
}

impl ListExpr {
    pub fn new(items: Vec<Expr>) -> Self {
        ListExpr {
            items,
            active: Cell::new(0),
        }
    }

    /// Index of the element currently producing results.
    #[inline]
    pub fn active(&self) -> usize {
        self.active.get()
    }

    #[inline]
    pub fn set_active(&self, index: usize) {
        self.active.set(index);
    }
}

impl Clone for ListExpr {
    fn clone(&self) -> Self {
        ListExpr::new(self.items.clone())
    }
}

impl PartialEq for ListExpr {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

/// Node kinds. See the crate docs of `duel_eval` for what each one yields.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Ident),
    /// Run of `n` underscores: the value `n` scopes out.
    Underscore(usize),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
    },
    Parens(Box<Expr>),
    Curlies(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Filter {
        op: FilterOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Struct {
        op: StructOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    StructWalk {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    TakeNth {
        seq: Box<Expr>,
        index: Box<Expr>,
    },
    Until {
        op: UntilOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `..b` (`to == true`) or `a..` (`to == false`).
    URange {
        bound: Box<Expr>,
        to: bool,
    },
    BiRange {
        from: Box<Expr>,
        to: Box<Expr>,
    },
    EagerGrouping {
        fold: EagerFold,
        spelling: FoldSpelling,
        operand: Box<Expr>,
    },
    LazyGrouping {
        fold: LazyFold,
        spelling: FoldSpelling,
        operand: Box<Expr>,
    },
    Ternary {
        form: TernaryForm,
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Option<Box<Expr>>,
    },
    Alias {
        name: Box<Expr>,
        value: Box<Expr>,
    },
    Enumerate {
        seq: Box<Expr>,
        index_name: Box<Expr>,
    },
    List(ListExpr),
    Statement(Vec<Expr>),
    Foreach {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: ListExpr,
    },
}

/// An expression node with its source location.
///
/// Equality is structural and ignores spans and evaluation caches.
#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Node without a source location, for trees built in code.
    #[inline]
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr::new(kind, Span::DUMMY)
    }

    pub fn literal(literal: Literal) -> Self {
        Self::synthetic(ExprKind::Literal(literal))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Ident(Ident::new(name)))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::synthetic(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn list(items: Vec<Expr>) -> Self {
        Self::synthetic(ExprKind::List(ListExpr::new(items)))
    }

    pub fn parens(inner: Expr) -> Self {
        Self::synthetic(ExprKind::Parens(Box::new(inner)))
    }

    /// The identifier name, if this node is a plain identifier.
    pub fn as_ident(&self) -> Option<&Ident> {
        match &self.kind {
            ExprKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// True for the literal node kind only (not for parenthesized literals).
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }

    pub fn is_curlies(&self) -> bool {
        matches!(self.kind, ExprKind::Curlies(_))
    }
}
