//! Small host for unit tests: integers, records, a pointer cell table and
//! a hand-built call stack.

use std::cell::Cell;

use duel_ir::{BinaryOp, Literal, LiteralValue, PostfixOp, UnaryOp};

use crate::errors::{host_error, type_mismatch, undefined_field, EvalResult};
use crate::host::{BlockSymbol, Host, SymbolKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Mock {
    Int(i64),
    /// Index into `MockHost::cells`, 1-based; 0 is null.
    Ptr(usize),
    Rec {
        ty: &'static str,
        fields: Vec<(&'static str, Mock)>,
    },
    Ref(Box<Mock>),
    Func(&'static str),
}

impl Mock {
    pub fn rec(ty: &'static str, fields: Vec<(&'static str, Mock)>) -> Self {
        Mock::Rec { ty, fields }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockBlock {
    pub symbols: Vec<(BlockSymbol, Mock)>,
    pub global: bool,
    pub starts_function: bool,
}

#[derive(Clone, Debug, Default)]
pub struct MockFrame {
    pub function: String,
    /// Innermost first; each block's superblock is the next one.
    pub blocks: Vec<MockBlock>,
}

#[derive(Default)]
pub struct MockHost {
    pub cells: Vec<Mock>,
    pub globals: Vec<(&'static str, Mock)>,
    /// Innermost first.
    pub frames: Vec<MockFrame>,
    /// Record types with a `norm` member function.
    pub method_types: Vec<&'static str>,
    /// Number of `literal` conversions so far.
    pub literals: Cell<usize>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` in a new cell and return a pointer to it.
    pub fn alloc(&mut self, value: Mock) -> Mock {
        self.cells.push(value);
        Mock::Ptr(self.cells.len())
    }

    fn int(value: &Mock) -> EvalResult<i64> {
        match value {
            Mock::Int(n) => Ok(*n),
            Mock::Ref(inner) => Self::int(inner),
            other => Err(type_mismatch("int", &format!("{other:?}"))),
        }
    }
}

impl Host for MockHost {
    type Object = Mock;
    type Frame = usize;
    type Block = (usize, usize);

    fn literal(&self, literal: &Literal) -> EvalResult<Mock> {
        self.literals.set(self.literals.get() + 1);
        match literal.value {
            LiteralValue::Int(n) => Ok(Mock::Int(i64::try_from(n).unwrap_or(i64::MAX))),
            _ => Err(host_error("only integer literals")),
        }
    }

    fn from_i64(&self, n: i64, _like: Option<&Mock>) -> EvalResult<Mock> {
        Ok(Mock::Int(n))
    }

    fn to_i64(&self, value: &Mock) -> EvalResult<i64> {
        Self::int(value)
    }

    fn is_truthy(&self, value: &Mock) -> EvalResult<bool> {
        match value {
            Mock::Int(n) => Ok(*n != 0),
            Mock::Ptr(p) => Ok(*p != 0),
            Mock::Ref(inner) => self.is_truthy(inner),
            _ => Ok(true),
        }
    }

    fn unary(&self, op: UnaryOp, value: &Mock) -> EvalResult<Mock> {
        let n = Self::int(value)?;
        match op {
            UnaryOp::Neg => Ok(Mock::Int(-n)),
            UnaryOp::Not => Ok(Mock::Int(i64::from(n == 0))),
            UnaryOp::Plus => Ok(Mock::Int(n)),
            _ => Err(host_error("unsupported unary operator")),
        }
    }

    fn postfix(&self, _op: PostfixOp, _value: &Mock) -> EvalResult<Mock> {
        Err(host_error("read-only target"))
    }

    fn binary(&self, op: BinaryOp, left: &Mock, right: &Mock) -> EvalResult<Mock> {
        let (l, r) = (Self::int(left)?, Self::int(right)?);
        let n = match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Eq => i64::from(l == r),
            BinaryOp::NotEq => i64::from(l != r),
            BinaryOp::Lt => i64::from(l < r),
            BinaryOp::Gt => i64::from(l > r),
            BinaryOp::LtEq => i64::from(l <= r),
            BinaryOp::GtEq => i64::from(l >= r),
            _ => return Err(host_error("unsupported binary operator")),
        };
        Ok(Mock::Int(n))
    }

    fn index(&self, _base: &Mock, _index: &Mock) -> EvalResult<Mock> {
        Err(host_error("no arrays"))
    }

    fn dereference(&self, value: &Mock) -> EvalResult<Mock> {
        match value {
            Mock::Ptr(0) => Err(host_error("null dereference")),
            Mock::Ptr(p) => self
                .cells
                .get(p - 1)
                .cloned()
                .ok_or_else(|| host_error("dangling pointer")),
            other => Err(type_mismatch("pointer", &format!("{other:?}"))),
        }
    }

    fn is_reference(&self, value: &Mock) -> bool {
        matches!(value, Mock::Ref(_))
    }

    fn is_pointer(&self, value: &Mock) -> bool {
        matches!(value, Mock::Ptr(_))
    }

    fn referenced_value(&self, value: &Mock) -> EvalResult<Mock> {
        match value {
            Mock::Ref(inner) => Ok((**inner).clone()),
            other => Ok(other.clone()),
        }
    }

    fn size_of(&self, value: &Mock) -> EvalResult<Mock> {
        match value {
            Mock::Rec { fields, .. } => Ok(Mock::Int(8 * i64::try_from(fields.len()).unwrap_or(0))),
            _ => Ok(Mock::Int(8)),
        }
    }

    fn field(&self, value: &Mock, name: &str) -> EvalResult<Mock> {
        match value {
            Mock::Rec { fields, .. } => fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| undefined_field(name)),
            Mock::Ptr(_) => self.field(&self.dereference(value)?, name),
            Mock::Ref(inner) => self.field(inner, name),
            _ => Err(undefined_field(name)),
        }
    }

    fn type_name(&self, value: &Mock) -> String {
        match value {
            Mock::Int(_) => "int".to_string(),
            Mock::Ptr(_) => "pointer".to_string(),
            Mock::Rec { ty, .. } => (*ty).to_string(),
            Mock::Ref(inner) => self.type_name(inner),
            Mock::Func(_) => "function".to_string(),
        }
    }

    fn has_method(&self, value: &Mock, name: &str) -> bool {
        name == "norm"
            && matches!(value, Mock::Rec { ty, .. } if self.method_types.contains(ty))
    }

    fn call_member(&self, receiver: &Mock, method: &str, _args: &[Mock]) -> EvalResult<Mock> {
        match (receiver, method) {
            (Mock::Rec { fields, .. }, "norm") => {
                let mut sum = 0;
                for (_, v) in fields {
                    sum += Self::int(v)?;
                }
                Ok(Mock::Int(sum))
            }
            _ => Err(host_error(format!("no member function {method}"))),
        }
    }

    fn call(&self, callee: &Mock, args: &[Mock]) -> EvalResult<Mock> {
        match callee {
            Mock::Func("add") => {
                let mut sum = 0;
                for arg in args {
                    sum += Self::int(arg)?;
                }
                Ok(Mock::Int(sum))
            }
            other => Err(host_error(format!("cannot call {other:?}"))),
        }
    }

    fn call_by_name(&self, name: &str, _args: &[Mock]) -> EvalResult<Mock> {
        Err(host_error(format!("cannot call {name}")))
    }

    fn render(&self, value: &Mock) -> String {
        match value {
            Mock::Int(n) => n.to_string(),
            Mock::Ptr(0) => "0x0".to_string(),
            Mock::Ptr(p) => format!("0x{:x}", p * 16),
            Mock::Rec { fields, .. } => {
                let inner: Vec<String> = fields
                    .iter()
                    .map(|(name, v)| format!("{name} = {}", self.render(v)))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Mock::Ref(inner) => format!("@{}", self.render(inner)),
            Mock::Func(name) => format!("<{name}>"),
        }
    }

    fn newest_frame(&self) -> Option<usize> {
        (!self.frames.is_empty()).then_some(0)
    }

    fn older_frame(&self, frame: &usize) -> Option<usize> {
        let older = frame + 1;
        (older < self.frames.len()).then_some(older)
    }

    fn frame_function(&self, frame: &usize) -> Option<String> {
        self.frames.get(*frame).map(|f| f.function.clone())
    }

    fn frame_level(&self, frame: &usize) -> usize {
        *frame
    }

    fn frame_block(&self, frame: &usize) -> Option<(usize, usize)> {
        let blocks = &self.frames.get(*frame)?.blocks;
        (!blocks.is_empty()).then_some((*frame, 0))
    }

    fn superblock(&self, &(frame, block): &(usize, usize)) -> Option<(usize, usize)> {
        let blocks = &self.frames.get(frame)?.blocks;
        (block + 1 < blocks.len()).then_some((frame, block + 1))
    }

    fn block_is_global(&self, block: &(usize, usize)) -> bool {
        self.block(*block).is_some_and(|b| b.global)
    }

    fn block_starts_function(&self, block: &(usize, usize)) -> bool {
        self.block(*block).is_some_and(|b| b.starts_function)
    }

    fn block_symbols(&self, block: &(usize, usize)) -> Vec<BlockSymbol> {
        self.block(*block)
            .map(|b| b.symbols.iter().map(|(s, _)| s.clone()).collect())
            .unwrap_or_default()
    }

    fn read_symbol(&self, _frame: &usize, block: &(usize, usize), name: &str) -> EvalResult<Mock> {
        self.block(*block)
            .and_then(|b| b.symbols.iter().find(|(s, _)| s.name == name))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| undefined_field(name))
    }

    fn lookup_variable(&self, name: &str) -> Option<Mock> {
        self.globals
            .iter()
            .find(|(global, _)| *global == name)
            .map(|(_, v)| v.clone())
    }

    fn parse_and_eval(&self, text: &str) -> EvalResult<Mock> {
        if text == "$conv" {
            return Ok(Mock::Int(77));
        }
        text.parse()
            .map(Mock::Int)
            .map_err(|_| host_error(format!("no symbol \"{text}\" in current context")))
    }
}

impl MockHost {
    fn block(&self, (frame, block): (usize, usize)) -> Option<&MockBlock> {
        self.frames.get(frame)?.blocks.get(block)
    }
}

/// A symbol of the given kind.
pub fn symbol(name: &str, kind: SymbolKind, value: Mock) -> (BlockSymbol, Mock) {
    (BlockSymbol::new(name, kind), value)
}
