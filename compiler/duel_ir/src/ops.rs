//! Operators of the duel grammar.
//!
//! Arithmetic, comparison, bitwise and logical operators are applied by the
//! host (they are C operators on target values). The duel-specific
//! operators (`-->`, `[[ ]]`, `@`, `:=`, `#`, `=>`) are node kinds of their
//! own and have no entry here except for their spelling variants.

/// Prefix operators: `+ - ! ~ * & ++ --`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
    BitNot,
    Deref,
    AddrOf,
    PreInc,
    PreDec,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Deref => "*",
            Self::AddrOf => "&",
            Self::PreInc => "++",
            Self::PreDec => "--",
        }
    }
}

/// Postfix operators: `++ --`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PostfixOp {
    PostInc,
    PostDec,
}

impl PostfixOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::PostInc => "++",
            Self::PostDec => "--",
        }
    }
}

/// Binary operators evaluated as a Cartesian product of both operands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    /// `x[i]`
    Index,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Index => "[]",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Comparison filters: `==? !=? <? >? <=? >=?`.
///
/// `a >? b` yields the items of `a` that compare greater than some item
/// of `b`, keeping `a`'s value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl FilterOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Eq => "==?",
            Self::NotEq => "!=?",
            Self::Lt => "<?",
            Self::LtEq => "<=?",
            Self::Gt => ">?",
            Self::GtEq => ">=?",
        }
    }

    /// The host comparison that decides whether an item passes.
    pub const fn comparison(self) -> BinaryOp {
        match self {
            Self::Eq => BinaryOp::Eq,
            Self::NotEq => BinaryOp::NotEq,
            Self::Lt => BinaryOp::Lt,
            Self::LtEq => BinaryOp::LtEq,
            Self::Gt => BinaryOp::Gt,
            Self::GtEq => BinaryOp::GtEq,
        }
    }
}

/// Field descend spelling: `s.f` or `p->f`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StructOp {
    Dot,
    Arrow,
}

impl StructOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Dot => ".",
            Self::Arrow => "->",
        }
    }
}

/// Until spelling: tight `s@0` or loose `s @@ 0`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UntilOp {
    At,
    AtAt,
}

impl UntilOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::At => "@",
            Self::AtAt => "@@",
        }
    }
}

/// Folds that drain their operand completely.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EagerFold {
    /// `#/x`, `count x`
    Count,
    /// `+/x`, `sum x`
    Sum,
}

/// Folds that stop as soon as the answer is known.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LazyFold {
    /// `&&/x`, `all x`
    All,
    /// `||/x`, `any x`
    Any,
}

impl LazyFold {
    /// Fold value before any item is seen.
    pub const fn initial(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Whether a grouping was written with its symbol or its keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FoldSpelling {
    Symbol,
    Keyword,
}

/// Prefix text for a grouping, e.g. `+/` or `sum `.
pub const fn eager_prefix(fold: EagerFold, spelling: FoldSpelling) -> &'static str {
    match (fold, spelling) {
        (EagerFold::Count, FoldSpelling::Symbol) => "#/",
        (EagerFold::Sum, FoldSpelling::Symbol) => "+/",
        (EagerFold::Count, FoldSpelling::Keyword) => "count ",
        (EagerFold::Sum, FoldSpelling::Keyword) => "sum ",
    }
}

/// Prefix text for a short-circuit grouping, e.g. `&&/` or `all `.
pub const fn lazy_prefix(fold: LazyFold, spelling: FoldSpelling) -> &'static str {
    match (fold, spelling) {
        (LazyFold::All, FoldSpelling::Symbol) => "&&/",
        (LazyFold::Any, FoldSpelling::Symbol) => "||/",
        (LazyFold::All, FoldSpelling::Keyword) => "all ",
        (LazyFold::Any, FoldSpelling::Keyword) => "any ",
    }
}

/// Ternary spelling.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TernaryForm {
    /// `c ? a : b`
    Conditional,
    /// `if (c) a` / `if (c) a else b`
    If,
}
