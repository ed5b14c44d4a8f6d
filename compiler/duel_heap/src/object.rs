//! Heap objects: a type and the data behind it.

use std::fmt;
use std::rc::Rc;

use crate::types::{IntKind, Type};

/// A function of the inspected program.
pub struct Function {
    pub name: String,
    pub arity: usize,
    pub body: Rc<dyn Fn(&crate::Heap, &[Obj]) -> duel_eval::EvalResult<Obj>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub enum Data {
    Int(i64),
    Double(f64),
    /// Cell address, 1-based; 0 is null.
    Addr(usize),
    /// Struct field values in declaration order.
    Fields(Rc<[Obj]>),
    /// First cell of an array; the length is in the type.
    Elements(usize),
    Str(Rc<str>),
    Func(Rc<Function>),
    /// Name of a debugger-internal function.
    Internal(Rc<str>),
    /// The object a reference refers to.
    Ref(Rc<Obj>),
}

/// A typed value.
#[derive(Clone, Debug)]
pub struct Obj {
    pub ty: Type,
    pub data: Data,
}

impl Obj {
    pub fn new(ty: Type, data: Data) -> Self {
        Obj { ty, data }
    }

    pub fn int(kind: IntKind, n: i64) -> Self {
        Obj::new(Type::Int(kind), Data::Int(kind.wrap(n)))
    }

    pub fn double(x: f64) -> Self {
        Obj::new(Type::Double, Data::Double(x))
    }

    pub fn null(target: Type) -> Self {
        Obj::new(Type::pointer_to(target), Data::Addr(0))
    }

    pub fn string(text: &str) -> Self {
        let len = text.len() + 1;
        Obj::new(
            Type::array_of(Type::Int(IntKind::Char), len),
            Data::Str(Rc::from(text)),
        )
    }

    pub fn reference(target: Obj) -> Self {
        Obj::new(Type::reference_to(target.ty.clone()), Data::Ref(Rc::new(target)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, Data::Addr(0))
    }
}
