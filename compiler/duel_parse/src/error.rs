//! Parse error types.

use std::fmt;

use duel_ir::Span;

/// What went wrong while parsing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// A token that cannot appear here.
    UnexpectedToken,
    /// Input ended in the middle of an expression.
    UnexpectedEof,
    /// A quoted or numeric literal that could not be cooked.
    InvalidLiteral,
    /// Text the lexer could not match at all.
    LexError,
    /// A complete expression followed by more input.
    TrailingInput,
}

/// Parse error with location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
    /// What the parser was looking for, if it knew.
    pub expected: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            kind,
            message: message.into(),
            span,
            expected: None,
        }
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Render the error under the query text with a caret line.
    pub fn render(&self, source: &str) -> String {
        let start = (self.span.start as usize).min(source.len());
        let width = (self.span.len() as usize).max(1);
        format!(
            "{source}\n{}{}\nerror: {self}",
            " ".repeat(start),
            "^".repeat(width)
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
