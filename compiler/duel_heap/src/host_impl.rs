//! [`Host`] for the in-memory heap.

use duel_eval::errors::{host_error, not_callable, type_mismatch, undefined_field};
use duel_eval::{BlockSymbol, EvalResult, Host, SymbolKind};
use duel_ir::{BinaryOp, Literal, LiteralValue, PostfixOp, UnaryOp};
use tracing::trace;

use crate::heap::Heap;
use crate::object::{Data, Function, Obj};
use crate::ops::{self, strip_reference};
use crate::render;
use crate::types::{IntKind, Type};

impl Heap {
    fn no_symbol(name: &str) -> duel_eval::EvalError {
        host_error(format!("No symbol \"{name}\" in current context."))
    }

    /// Integer in the narrowest of `int`, `long` and `unsigned long`.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "unsigned long literals keep their bit pattern"
    )]
    fn int_literal(n: u64) -> Obj {
        if n <= u64::from(u32::MAX >> 1) {
            Obj::int(IntKind::Int, n as i64)
        } else if i64::try_from(n).is_ok() {
            Obj::int(IntKind::Long, n as i64)
        } else {
            Obj::int(IntKind::ULong, n as i64)
        }
    }

    fn type_size(&self, ty: &Type) -> usize {
        match ty {
            Type::Void | Type::Function(_) | Type::Internal => 1,
            Type::Int(kind) => kind.size(),
            Type::Double | Type::Pointer(_) => 8,
            Type::Array(element, len) => self.type_size(element) * len,
            Type::Struct(tag) => self.struct_def(tag).map_or(0, |def| {
                def.fields.iter().map(|(_, ty)| self.type_size(ty)).sum()
            }),
            Type::Reference(target) => self.type_size(target),
        }
    }

    /// Struct value behind `value`, following references and pointers.
    fn aggregate(&self, value: &Obj) -> EvalResult<Obj> {
        let value = strip_reference(value);
        match value.data {
            Data::Addr(_) => self.aggregate(&ops::dereference(self, value)?),
            _ => Ok(value.clone()),
        }
    }

    fn call_function(&self, function: &Function, args: &[Obj]) -> EvalResult<Obj> {
        if args.len() < function.arity {
            return Err(host_error("Too few arguments in function call."));
        }
        if args.len() > function.arity {
            return Err(host_error("Too many arguments in function call."));
        }
        trace!(function = %function.name, args = args.len(), "call");
        (function.body)(self, args)
    }

    /// Debugger-internal functions, by convenience name.
    fn call_internal(&self, name: &str, args: &[Obj]) -> EvalResult<Obj> {
        let text = |value: &Obj| match &strip_reference(value).data {
            Data::Str(text) => Ok(text.clone()),
            _ => Err(type_mismatch("string", &value.ty.to_string())),
        };
        match (name, args) {
            ("$_strlen", [s]) => {
                let len = i64::try_from(text(s)?.len()).map_err(|_| host_error("string too long"))?;
                Ok(Obj::int(IntKind::Int, len))
            }
            ("$_streq", [a, b]) => Ok(Obj::int(IntKind::Int, i64::from(text(a)? == text(b)?))),
            ("$_strlen" | "$_streq", _) => Err(host_error(format!(
                "wrong number of arguments to {}",
                name.trim_start_matches('$')
            ))),
            _ => Err(Self::no_symbol(name)),
        }
    }
}

impl Host for Heap {
    type Object = Obj;
    /// Distance from the innermost frame.
    type Frame = usize;
    type Block = usize;

    fn literal(&self, literal: &Literal) -> EvalResult<Obj> {
        self.count_literal();
        Ok(match &literal.value {
            LiteralValue::Int(n) => Self::int_literal(*n),
            LiteralValue::Float(x) => Obj::double(*x),
            LiteralValue::Char(c) => Obj::int(IntKind::Char, i64::from(u32::from(*c))),
            LiteralValue::Str(s) => Obj::string(s),
        })
    }

    #[expect(clippy::cast_precision_loss, reason = "C int to double conversion")]
    fn from_i64(&self, n: i64, like: Option<&Obj>) -> EvalResult<Obj> {
        let like = like.map(strip_reference);
        Ok(match like.map(|value| &value.ty) {
            Some(Type::Int(kind)) => Obj::int(*kind, n),
            Some(Type::Double) => Obj::double(n as f64),
            _ if i32::try_from(n).is_ok() => Obj::int(IntKind::Int, n),
            _ => Obj::int(IntKind::Long, n),
        })
    }

    #[expect(clippy::cast_possible_truncation, reason = "C truncates toward zero")]
    fn to_i64(&self, value: &Obj) -> EvalResult<i64> {
        let value = strip_reference(value);
        match value.data {
            Data::Int(n) => Ok(n),
            Data::Double(x) => Ok(x as i64),
            Data::Addr(addr) => i64::try_from(addr).map_err(|_| host_error("address out of range")),
            _ => Err(type_mismatch("integer", &value.ty.to_string())),
        }
    }

    fn is_truthy(&self, value: &Obj) -> EvalResult<bool> {
        ops::is_truthy(value)
    }

    fn unary(&self, op: UnaryOp, value: &Obj) -> EvalResult<Obj> {
        ops::unary(self, op, value)
    }

    fn postfix(&self, op: PostfixOp, value: &Obj) -> EvalResult<Obj> {
        ops::postfix(op, value)
    }

    fn binary(&self, op: BinaryOp, left: &Obj, right: &Obj) -> EvalResult<Obj> {
        match op {
            BinaryOp::Index => ops::index(self, left, right),
            _ => ops::binary(op, left, right),
        }
    }

    fn index(&self, base: &Obj, index: &Obj) -> EvalResult<Obj> {
        ops::index(self, base, index)
    }

    fn dereference(&self, value: &Obj) -> EvalResult<Obj> {
        ops::dereference(self, value)
    }

    fn is_reference(&self, value: &Obj) -> bool {
        matches!(value.data, Data::Ref(_))
    }

    fn is_pointer(&self, value: &Obj) -> bool {
        matches!(value.ty, Type::Pointer(_))
    }

    fn referenced_value(&self, value: &Obj) -> EvalResult<Obj> {
        match &value.data {
            Data::Ref(target) => Ok((**target).clone()),
            _ => Err(type_mismatch("reference", &value.ty.to_string())),
        }
    }

    fn reference_to(&self, value: &Obj) -> Option<Obj> {
        match value.data {
            Data::Ref(_) => None,
            _ => Some(Obj::reference(value.clone())),
        }
    }

    fn size_of(&self, value: &Obj) -> EvalResult<Obj> {
        let size = self.type_size(&strip_reference(value).ty);
        let size = i64::try_from(size).map_err(|_| host_error("type too large"))?;
        Ok(Obj::int(IntKind::ULong, size))
    }

    fn field(&self, value: &Obj, name: &str) -> EvalResult<Obj> {
        let value = self.aggregate(value)?;
        let (Type::Struct(tag), Data::Fields(fields)) = (&value.ty, &value.data) else {
            return Err(undefined_field(name));
        };
        self.struct_def(tag)
            .and_then(|def| def.field_index(name))
            .and_then(|i| fields.get(i))
            .cloned()
            .ok_or_else(|| undefined_field(name))
    }

    fn type_name(&self, value: &Obj) -> String {
        strip_reference(value).ty.to_string()
    }

    fn has_method(&self, value: &Obj, name: &str) -> bool {
        match &strip_reference(value).ty {
            Type::Struct(tag) => self
                .struct_def(tag)
                .is_some_and(|def| def.methods.contains_key(name)),
            _ => false,
        }
    }

    fn call_member(&self, receiver: &Obj, method: &str, args: &[Obj]) -> EvalResult<Obj> {
        let receiver = self.aggregate(receiver)?;
        let body = match &receiver.ty {
            Type::Struct(tag) => self
                .struct_def(tag)
                .and_then(|def| def.methods.get(method).cloned()),
            _ => None,
        };
        match body {
            Some(body) => (*body)(self, &receiver, args),
            None => Err(host_error(format!(
                "Couldn't find method {}::{method}",
                receiver.ty
            ))),
        }
    }

    fn call(&self, callee: &Obj, args: &[Obj]) -> EvalResult<Obj> {
        match &strip_reference(callee).data {
            Data::Func(function) => self.call_function(function, args),
            Data::Internal(name) if self.internal_calls() => self.call_internal(name, args),
            Data::Internal(name) => Err(host_error(format!(
                "cannot call internal function {name} directly"
            ))),
            _ => Err(not_callable(&callee.ty.to_string())),
        }
    }

    fn is_internal_function(&self, value: &Obj) -> bool {
        matches!(value.data, Data::Internal(_))
    }

    fn supports_internal_calls(&self) -> bool {
        self.internal_calls()
    }

    fn call_by_name(&self, name: &str, args: &[Obj]) -> EvalResult<Obj> {
        trace!(name, args = args.len(), "call by name");
        match self.convenience(name).or_else(|| self.global_value(name)) {
            Some(Obj {
                data: Data::Internal(internal),
                ..
            }) => self.call_internal(internal, args),
            Some(Obj {
                data: Data::Func(function),
                ..
            }) => self.call_function(function, args),
            Some(other) => Err(not_callable(&other.ty.to_string())),
            None => Err(Self::no_symbol(name)),
        }
    }

    fn render(&self, value: &Obj) -> String {
        render::render(self, value)
    }

    fn newest_frame(&self) -> Option<usize> {
        (self.frame_count() > 0).then_some(0)
    }

    fn older_frame(&self, frame: &usize) -> Option<usize> {
        let older = frame + 1;
        (older < self.frame_count()).then_some(older)
    }

    fn frame_function(&self, frame: &usize) -> Option<String> {
        self.frame(*frame).map(|info| info.function.clone())
    }

    fn frame_level(&self, frame: &usize) -> usize {
        *frame
    }

    fn frame_block(&self, frame: &usize) -> Option<usize> {
        self.frame(*frame).and_then(|info| info.block)
    }

    fn superblock(&self, block: &usize) -> Option<usize> {
        self.block(*block).and_then(|info| info.superblock)
    }

    fn block_is_global(&self, block: &usize) -> bool {
        self.block(*block).is_some_and(|info| info.global)
    }

    fn block_starts_function(&self, block: &usize) -> bool {
        self.block(*block).is_some_and(|info| info.function_start)
    }

    fn block_symbols(&self, block: &usize) -> Vec<BlockSymbol> {
        self.block(*block)
            .map(|info| info.symbols.iter().map(|(symbol, _)| symbol.clone()).collect())
            .unwrap_or_default()
    }

    fn read_symbol(&self, _frame: &usize, block: &usize, name: &str) -> EvalResult<Obj> {
        self.block(*block)
            .and_then(|info| info.symbols.iter().find(|(symbol, _)| symbol.name == name))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| undefined_field(name))
    }

    fn lookup_variable(&self, name: &str) -> Option<Obj> {
        let mut block = self.frame(0).and_then(|info| info.block);
        while let Some(current) = block.and_then(|b| self.block(b)) {
            let found = current
                .symbols
                .iter()
                .find(|(symbol, _)| symbol.name == name);
            if let Some((symbol, value)) = found {
                return (symbol.kind != SymbolKind::Function).then(|| value.clone());
            }
            block = current.superblock;
        }
        self.global_value(name)
            .filter(|value| !matches!(value.ty, Type::Function(_)))
            .cloned()
    }

    fn parse_and_eval(&self, text: &str) -> EvalResult<Obj> {
        let text = text.trim();
        if text.starts_with('$') {
            return self
                .convenience(text)
                .cloned()
                .ok_or_else(|| Self::no_symbol(text));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Ok(Self::int_literal(n));
        }
        self.global_value(text)
            .cloned()
            .ok_or_else(|| Self::no_symbol(text))
    }
}
