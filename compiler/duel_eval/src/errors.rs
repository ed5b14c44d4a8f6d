//! Error types for query evaluation.
//!
//! `EvalErrorKind` gives each failure a typed category; the factory
//! functions below are the public way to build errors and fill in both
//! `kind` and `message`.

use std::fmt;

use duel_ir::Span;

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A name that no resolution strategy could find.
    Undefined { name: String },
    /// A field or local that does not exist on the value or frame.
    UndefinedField { field: String },
    /// Index outside a sequence, the frame stack or the scope stack.
    IndexOutOfRange { what: String, index: i64 },
    TypeMismatch { expected: String, got: String },
    NotCallable { what: String },
    /// Failure reported by the inspection host.
    Host { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined { name } => write!(f, "undefined: {name}"),
            Self::UndefinedField { field } => write!(f, "no field or variable '{field}'"),
            Self::IndexOutOfRange { what, index } => {
                write!(f, "{what} index {index} out of range")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::NotCallable { what } => write!(f, "{what} is not callable"),
            Self::Host { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Query location, when known.
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source span unless one is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn undefined(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Undefined {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_field(field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
    })
}

#[cold]
pub fn index_out_of_range(what: &str, index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange {
        what: what.to_string(),
        index,
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn not_callable(what: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        what: what.to_string(),
    })
}

/// `_`, `__`, ... reaching past the outermost scope.
#[cold]
pub fn no_scope(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange {
        what: "scope".to_string(),
        index: i64::try_from(depth).unwrap_or(i64::MAX),
    })
}

/// Error raised by a host implementation.
#[cold]
pub fn host_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Host {
        message: message.into(),
    })
}
