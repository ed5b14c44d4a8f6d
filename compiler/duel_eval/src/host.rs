//! The inspection host: typed target values and the execution context.
//!
//! The evaluator never looks inside a target value. Everything it needs
//! (C operators, field access, dereferencing, the call stack) goes through
//! [`Host`], implemented by a debugger backend or by an in-memory model
//! such as `duel_heap`.

use std::fmt;

use duel_ir::{BinaryOp, Literal, PostfixOp, UnaryOp};

use crate::errors::EvalResult;

/// What a symbol in a lexical block stands for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Argument,
    Variable,
    Constant,
    Function,
    Other,
}

impl SymbolKind {
    /// Arguments, locals and constants are visible through a frame.
    pub const fn is_frame_visible(self) -> bool {
        matches!(self, Self::Argument | Self::Variable | Self::Constant)
    }
}

/// A symbol declared in a lexical block.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BlockSymbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl BlockSymbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        BlockSymbol {
            name: name.into(),
            kind,
        }
    }
}

/// Value and execution-context capability consumed by the evaluator.
pub trait Host {
    /// A typed target value.
    type Object: Clone + fmt::Debug;
    /// A stack frame handle.
    type Frame: Clone + fmt::Debug;
    /// A lexical block handle.
    type Block: Clone + fmt::Debug;

    // Values

    /// Target value for a query literal.
    fn literal(&self, literal: &Literal) -> EvalResult<Self::Object>;

    /// Integer `n`, cast to the type of `like` when given.
    fn from_i64(&self, n: i64, like: Option<&Self::Object>) -> EvalResult<Self::Object>;

    fn to_i64(&self, value: &Self::Object) -> EvalResult<i64>;

    /// C truthiness: nonzero scalars and non-null pointers.
    fn is_truthy(&self, value: &Self::Object) -> EvalResult<bool>;

    fn unary(&self, op: UnaryOp, value: &Self::Object) -> EvalResult<Self::Object>;

    fn postfix(&self, op: PostfixOp, value: &Self::Object) -> EvalResult<Self::Object>;

    /// C binary operator. Comparisons return a truth value of the host's
    /// choosing. `BinaryOp::Index` is routed to [`Host::index`] instead.
    fn binary(
        &self,
        op: BinaryOp,
        left: &Self::Object,
        right: &Self::Object,
    ) -> EvalResult<Self::Object>;

    /// `base[index]` on an array or pointer.
    fn index(&self, base: &Self::Object, index: &Self::Object) -> EvalResult<Self::Object>;

    /// The value a pointer points to.
    fn dereference(&self, value: &Self::Object) -> EvalResult<Self::Object>;

    fn is_reference(&self, value: &Self::Object) -> bool;

    fn is_pointer(&self, value: &Self::Object) -> bool;

    /// The value a reference refers to.
    fn referenced_value(&self, value: &Self::Object) -> EvalResult<Self::Object>;

    /// A reference to `value`, if the target can make one.
    fn reference_to(&self, value: &Self::Object) -> Option<Self::Object> {
        let _ = value;
        None
    }

    /// Byte size of the value's type.
    fn size_of(&self, value: &Self::Object) -> EvalResult<Self::Object>;

    /// Field or member access; pointers to aggregates are followed.
    fn field(&self, value: &Self::Object, name: &str) -> EvalResult<Self::Object>;

    /// Type name with typedefs stripped; method registries key on it.
    fn type_name(&self, value: &Self::Object) -> String;

    /// Whether the value's type declares a member function `name`.
    fn has_method(&self, value: &Self::Object, name: &str) -> bool;

    /// Call member function `method` on `receiver`.
    fn call_member(
        &self,
        receiver: &Self::Object,
        method: &str,
        args: &[Self::Object],
    ) -> EvalResult<Self::Object>;

    /// Call a function value.
    fn call(&self, callee: &Self::Object, args: &[Self::Object]) -> EvalResult<Self::Object>;

    /// Whether the value is a debugger-internal function handle.
    fn is_internal_function(&self, value: &Self::Object) -> bool {
        let _ = value;
        false
    }

    /// Whether internal function handles can be called directly.
    fn supports_internal_calls(&self) -> bool {
        true
    }

    /// Call a function by its source text.
    fn call_by_name(&self, name: &str, args: &[Self::Object]) -> EvalResult<Self::Object>;

    /// Display text of a value.
    fn render(&self, value: &Self::Object) -> String;

    // Execution context

    /// The innermost frame, if the target is running.
    fn newest_frame(&self) -> Option<Self::Frame>;

    /// The caller of `frame`.
    fn older_frame(&self, frame: &Self::Frame) -> Option<Self::Frame>;

    /// Function name of the frame, templates included.
    fn frame_function(&self, frame: &Self::Frame) -> Option<String>;

    /// Distance from the innermost frame.
    fn frame_level(&self, frame: &Self::Frame) -> usize;

    /// Innermost lexical block at the frame's pc.
    fn frame_block(&self, frame: &Self::Frame) -> Option<Self::Block>;

    fn superblock(&self, block: &Self::Block) -> Option<Self::Block>;

    fn block_is_global(&self, block: &Self::Block) -> bool;

    /// Whether this is the outermost block of a function body.
    fn block_starts_function(&self, block: &Self::Block) -> bool;

    fn block_symbols(&self, block: &Self::Block) -> Vec<BlockSymbol>;

    /// Value of symbol `name` of `block` as seen from `frame`.
    fn read_symbol(
        &self,
        frame: &Self::Frame,
        block: &Self::Block,
        name: &str,
    ) -> EvalResult<Self::Object>;

    /// Variable visible from the selected frame, or a global. Functions are
    /// not variables.
    fn lookup_variable(&self, name: &str) -> Option<Self::Object>;

    /// Evaluate text with the target's own expression evaluator.
    fn parse_and_eval(&self, text: &str) -> EvalResult<Self::Object>;
}
