//! Literal constants as written in a query.

/// The native value of a literal, before the host turns it into a target
/// value of the appropriate type.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    /// Decimal, `0x` hex or leading-`0` octal integer.
    Int(u64),
    Float(f64),
    Char(char),
    Str(String),
}

/// A literal with its source spelling; the spelling is its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub text: String,
    pub value: LiteralValue,
}

impl Literal {
    pub fn new(text: impl Into<String>, value: LiteralValue) -> Self {
        Literal {
            text: text.into(),
            value,
        }
    }

    /// Decimal integer literal spelled the usual way.
    pub fn int(value: u64) -> Self {
        Literal {
            text: value.to_string(),
            value: LiteralValue::Int(value),
        }
    }
}
