//! Cooked tokens handed to the parser.

use std::fmt;

use duel_ir::Span;

/// A token with its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(u64),
    /// Float stored as bits.
    Float(u64),
    Char(char),
    String(String),

    Ident(String),
    /// `$name`, with the `$` kept.
    Dollar(String),
    /// Number of underscores in a bare `_` run.
    Underscores(usize),

    // Keywords
    If,
    Else,

    // Reductions
    PlusSlash,
    HashSlash,
    AmpAmpSlash,
    PipePipeSlash,

    // Duel operators
    FatArrow,
    Hash,
    ColonEq,
    AtAt,
    At,
    LongArrow,
    Arrow,
    EqEqQuestion,
    NotEqQuestion,
    LtQuestion,
    GtQuestion,
    LtEqQuestion,
    GtEqQuestion,
    DotDot,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Question,
    Colon,
    Dot,

    // C operators
    PipePipe,
    AmpAmp,
    Pipe,
    Caret,
    Amp,
    EqEq,
    NotEq,
    LtEq,
    GtEq,
    Shl,
    Shr,
    Lt,
    Gt,
    PlusPlus,
    MinusMinus,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Tilde,

    /// Text logos could not match, or a literal that failed to cook.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for "expected X, found Y" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Char(_) => "character literal",
            TokenKind::String(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Dollar(_) => "`$` variable",
            TokenKind::Underscores(_) => "`_`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::PlusSlash => "`+/`",
            TokenKind::HashSlash => "`#/`",
            TokenKind::AmpAmpSlash => "`&&/`",
            TokenKind::PipePipeSlash => "`||/`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Hash => "`#`",
            TokenKind::ColonEq => "`:=`",
            TokenKind::AtAt => "`@@`",
            TokenKind::At => "`@`",
            TokenKind::LongArrow => "`-->`",
            TokenKind::Arrow => "`->`",
            TokenKind::EqEqQuestion => "`==?`",
            TokenKind::NotEqQuestion => "`!=?`",
            TokenKind::LtQuestion => "`<?`",
            TokenKind::GtQuestion => "`>?`",
            TokenKind::LtEqQuestion => "`<=?`",
            TokenKind::GtEqQuestion => "`>=?`",
            TokenKind::DotDot => "`..`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::PipePipe => "`||`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Amp => "`&`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Bang => "`!`",
            TokenKind::Tilde => "`~`",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }

    /// True if this token can begin an operand. Used to tell the grouping
    /// keywords (`sum x`) from identifiers of the same name (`sum + 1`).
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Char(_)
                | TokenKind::String(_)
                | TokenKind::Ident(_)
                | TokenKind::Dollar(_)
                | TokenKind::Underscores(_)
                | TokenKind::If
                | TokenKind::PlusSlash
                | TokenKind::HashSlash
                | TokenKind::AmpAmpSlash
                | TokenKind::PipePipeSlash
                | TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::DotDot
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Bang
                | TokenKind::Tilde
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
