//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! literal cooking and final token conversion.

use logos::Logos;

use crate::parse_helpers::{parse_c_float, parse_c_int};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("if")]
    If,
    #[token("else")]
    Else,

    // Reduction prefixes
    #[token("+/")]
    PlusSlash,
    #[token("#/")]
    HashSlash,
    #[token("&&/")]
    AmpAmpSlash,
    #[token("||/")]
    PipePipeSlash,

    // Duel operators
    #[token("=>")]
    FatArrow,
    #[token("#")]
    Hash,
    #[token(":=")]
    ColonEq,
    #[token("@@")]
    AtAt,
    #[token("@")]
    At,
    #[token("-->")]
    LongArrow,
    #[token("->")]
    Arrow,
    #[token("==?")]
    EqEqQuestion,
    #[token("!=?")]
    NotEqQuestion,
    #[token("<?")]
    LtQuestion,
    #[token(">?")]
    GtQuestion,
    #[token("<=?")]
    LtEqQuestion,
    #[token(">=?")]
    GtEqQuestion,
    #[token("..")]
    DotDot,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    // `[[` and `]]` are recognized by the parser from adjacent brackets so
    // that `a[b[1]]` still closes two subscripts.
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // C operators
    #[token("||")]
    PipePipe,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,

    // Integer: `0x` hex, leading-zero octal or decimal, C suffixes ignored
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*", |lex| parse_c_int(lex.slice()))]
    #[regex(r"[0-9]+[uUlL]*", |lex| parse_c_int(lex.slice()))]
    Int(u64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| parse_c_float(lex.slice()))]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| parse_c_float(lex.slice()))]
    Float(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\[^0-7x\n]|\\[0-7][0-7]?[0-7]?|\\x[0-9a-fA-F][0-9a-fA-F]?)'")]
    Char,

    /// `$name` or `$1`: a convenience variable of the inspected program.
    #[regex(r"\$[A-Za-z0-9_]+")]
    Dollar,

    /// Runs of bare underscores: `_`, `__`, ...
    #[regex(r"_+")]
    Underscores,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    #[regex(r"_+[A-Za-z0-9][A-Za-z0-9_]*")]
    Ident,
}
