//! Lexer for duel queries using logos.
//!
//! Produces a `Vec<Token>` terminated by an `Eof` token. Unmatched text and
//! literals that fail to cook become `Error` tokens; the parser reports
//! them.

mod parse_helpers;
mod raw_token;
mod token;

use logos::Logos;

use duel_ir::Span;

use crate::parse_helpers::{unescape, unescape_char};
use crate::raw_token::RawToken;

pub use token::{Token, TokenKind};

/// Lex a query into tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut result = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match token_result {
            Ok(raw) => convert_token(raw, logos.slice()),
            Err(()) => TokenKind::Error,
        };
        result.push(Token::new(kind, span));
    }

    let eof = u32::try_from(source.len()).unwrap_or(u32::MAX);
    result.push(Token::new(TokenKind::Eof, Span::point(eof)));
    result
}

fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::Float(f) => TokenKind::Float(f.to_bits()),
        RawToken::String => unescape(&slice[1..slice.len() - 1])
            .map_or(TokenKind::Error, TokenKind::String),
        RawToken::Char => {
            unescape_char(&slice[1..slice.len() - 1]).map_or(TokenKind::Error, TokenKind::Char)
        }
        RawToken::Dollar => TokenKind::Dollar(slice.to_owned()),
        RawToken::Underscores => TokenKind::Underscores(slice.len()),
        RawToken::Ident => TokenKind::Ident(slice.to_owned()),

        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,

        RawToken::PlusSlash => TokenKind::PlusSlash,
        RawToken::HashSlash => TokenKind::HashSlash,
        RawToken::AmpAmpSlash => TokenKind::AmpAmpSlash,
        RawToken::PipePipeSlash => TokenKind::PipePipeSlash,

        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::Hash => TokenKind::Hash,
        RawToken::ColonEq => TokenKind::ColonEq,
        RawToken::AtAt => TokenKind::AtAt,
        RawToken::At => TokenKind::At,
        RawToken::LongArrow => TokenKind::LongArrow,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::EqEqQuestion => TokenKind::EqEqQuestion,
        RawToken::NotEqQuestion => TokenKind::NotEqQuestion,
        RawToken::LtQuestion => TokenKind::LtQuestion,
        RawToken::GtQuestion => TokenKind::GtQuestion,
        RawToken::LtEqQuestion => TokenKind::LtEqQuestion,
        RawToken::GtEqQuestion => TokenKind::GtEqQuestion,
        RawToken::DotDot => TokenKind::DotDot,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,

        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Amp => TokenKind::Amp,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
    }
}
