//! C-like types of heap objects.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::object::Obj;
use duel_eval::EvalResult;

use crate::heap::Heap;

/// Integer types, narrowest first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum IntKind {
    Bool,
    Char,
    Int,
    UInt,
    Long,
    ULong,
}

impl IntKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "int",
            Self::UInt => "unsigned int",
            Self::Long => "long",
            Self::ULong => "unsigned long",
        }
    }

    pub const fn size(self) -> usize {
        match self {
            Self::Bool | Self::Char => 1,
            Self::Int | Self::UInt => 4,
            Self::Long | Self::ULong => 8,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Char | Self::Int | Self::Long)
    }

    /// Wrap `n` to the range of this type.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless,
        reason = "two's complement wrap-around is the point"
    )]
    pub fn wrap(self, n: i64) -> i64 {
        match self {
            Self::Bool => i64::from(n != 0),
            Self::Char => n as i8 as i64,
            Self::Int => n as i32 as i64,
            Self::UInt => n as u32 as i64,
            Self::Long | Self::ULong => n,
        }
    }

    /// Result type of a binary operation on `self` and `other`.
    pub fn promote(self, other: IntKind) -> IntKind {
        self.max(other).max(IntKind::Int)
    }
}

/// Type of a heap object.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Void,
    Int(IntKind),
    Double,
    Pointer(Rc<Type>),
    Array(Rc<Type>, usize),
    /// Struct, by tag.
    Struct(Rc<str>),
    Reference(Rc<Type>),
    Function(Rc<str>),
    /// Debugger-internal function.
    Internal,
}

impl Type {
    pub fn int() -> Self {
        Type::Int(IntKind::Int)
    }

    pub fn pointer_to(target: Type) -> Self {
        Type::Pointer(Rc::new(target))
    }

    pub fn array_of(element: Type, len: usize) -> Self {
        Type::Array(Rc::new(element), len)
    }

    pub fn structure(tag: &str) -> Self {
        Type::Struct(Rc::from(tag))
    }

    pub fn reference_to(target: Type) -> Self {
        Type::Reference(Rc::new(target))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Int(kind) => f.write_str(kind.name()),
            Type::Double => f.write_str("double"),
            Type::Pointer(target) => write!(f, "{target} *"),
            Type::Array(element, len) => write!(f, "{element} [{len}]"),
            Type::Struct(tag) => f.write_str(tag),
            Type::Reference(target) => write!(f, "{target} &"),
            Type::Function(name) => write!(f, "function {name}"),
            Type::Internal => f.write_str("internal function"),
        }
    }
}

/// A member function body: `(heap, receiver, args) -> result`.
pub type MethodBody = Rc<dyn Fn(&Heap, &Obj, &[Obj]) -> EvalResult<Obj>>;

/// Layout and member functions of a struct type.
#[derive(Clone, Default)]
pub struct StructDef {
    pub tag: String,
    pub fields: Vec<(String, Type)>,
    pub methods: FxHashMap<String, MethodBody>,
}

impl StructDef {
    pub fn new(tag: &str) -> Self {
        StructDef {
            tag: tag.to_string(),
            ..StructDef::default()
        }
    }

    #[must_use]
    pub fn field(mut self, name: &str, ty: Type) -> Self {
        self.fields.push((name.to_string(), ty));
        self
    }

    #[must_use]
    pub fn method<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&Heap, &Obj, &[Obj]) -> EvalResult<Obj> + 'static,
    {
        self.methods.insert(name.to_string(), Rc::new(body));
        self
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }
}

impl fmt::Debug for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("StructDef")
            .field("tag", &self.tag)
            .field("fields", &self.fields)
            .field("methods", &methods)
            .finish()
    }
}
