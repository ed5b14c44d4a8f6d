//! Parser for duel queries.
//!
//! Recursive descent over the token list from `duel_lexer`, one function
//! per precedence level, loosest first:
//!
//! | Level | Operators |
//! |---|---|
//! | statement | `;` |
//! | list | `,` |
//! | grouping | `+/ #/ &&/ \|\|/ sum count all any` (prefix) |
//! | foreach | `=>` |
//! | enumerate | `#` |
//! | alias | `:=` (right associative) |
//! | until | `@@` |
//! | filter | `==? !=? <? >? <=? >=?` |
//! | ternary | `? :` |
//! | C binary | `\|\| && \| ^ & == != < > <= >= << >> + - * / %` |
//! | range | `..b`, `a..`, `a..b`, then `@` |
//! | unary | `++ -- + - ! ~ * &` |
//! | postfix | `++ -- () [] [[ ]] . -> -->` |
//! | primary | literals, names, `_`, `(…)`, `{…}`, `if` |

mod cursor;
mod error;
mod grammar;

use duel_ir::Expr;
use duel_lexer::Token;

use crate::cursor::Cursor;

pub use error::{ParseError, ParseErrorKind};

/// Parse a complete query.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = duel_lexer::lex(source);
    let mut parser = Parser::new(&tokens, source);
    let expr = parser.parse_statement()?;
    if !parser.cursor.is_at_end() {
        if parser.cursor.check(&duel_lexer::TokenKind::Error) {
            return Err(parser.lex_error());
        }
        let found = parser.cursor.current();
        return Err(ParseError::new(
            ParseErrorKind::TrailingInput,
            format!("unexpected {} after expression", found.kind.display_name()),
            found.span,
        ));
    }
    Ok(expr)
}

/// Parser state: a cursor over the tokens plus the source text, which
/// supplies literal spellings.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
        }
    }

    /// Source text covered by `span`.
    fn slice(&self, span: duel_ir::Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
