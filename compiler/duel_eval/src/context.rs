//! Shared state threaded through one evaluation.

use duel_ir::{BinaryOp, Builtin, Expr};

use crate::bindings::Bindings;
use crate::errors::{not_callable, type_mismatch, undefined_field, EvalResult};
use crate::exec::{self, Scoped, Stream};
use crate::frames::get_frame;
use crate::host::Host;
use crate::resolvers::{MethodCaller, MethodDispatcher};
use crate::scope::ScopeStack;
use crate::value::Value;

/// Borrowed view of a session's evaluation state.
///
/// Copied into every stream; all mutation goes through the `RefCell`s
/// inside the scope stack and the binding table.
pub struct EvalContext<'a, H: Host> {
    pub host: &'a H,
    pub scopes: &'a ScopeStack<H>,
    pub bindings: &'a Bindings<H>,
    pub dispatcher: &'a MethodDispatcher<H>,
}

impl<H: Host> Clone for EvalContext<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: Host> Copy for EvalContext<'_, H> {}

impl<'a, H: Host + 'a> EvalContext<'a, H> {
    pub fn new(
        host: &'a H,
        scopes: &'a ScopeStack<H>,
        bindings: &'a Bindings<H>,
        dispatcher: &'a MethodDispatcher<H>,
    ) -> Self {
        EvalContext {
            host,
            scopes,
            bindings,
            dispatcher,
        }
    }

    /// Lazy result stream of `expr`. Nothing is evaluated until the first
    /// `next()`.
    pub fn eval(self, expr: &'a Expr) -> Stream<'a, H> {
        exec::eval(self, expr)
    }

    /// Like [`EvalContext::eval`], with `value` pushed on the scope stack
    /// around every step.
    pub fn eval_scoped(self, value: Value<H>, expr: &'a Expr) -> Stream<'a, H> {
        Stream::new(Scoped::new(self.scopes, value, self.eval(expr)))
    }

    /// The target value inside `value`, or a type mismatch.
    pub fn object<'v>(&self, value: &'v Value<H>) -> EvalResult<&'v H::Object> {
        value
            .as_object()
            .ok_or_else(|| type_mismatch("value", value.kind_name()))
    }

    pub(crate) fn objects(&self, values: &[Value<H>]) -> EvalResult<Vec<H::Object>> {
        values.iter().map(|v| self.object(v).cloned()).collect()
    }

    /// Handles (frames, methods, builtins) count as true.
    pub fn truthy(&self, value: &Value<H>) -> EvalResult<bool> {
        match value {
            Value::Object(object) => self.host.is_truthy(object),
            _ => Ok(true),
        }
    }

    pub fn text(&self, value: &Value<H>) -> String {
        value.text(self.host)
    }

    /// Apply a binary operator. `==` and `!=` between frames compare
    /// function names.
    pub fn apply_binary(
        &self,
        op: BinaryOp,
        left: &Value<H>,
        right: &Value<H>,
    ) -> EvalResult<Value<H>> {
        if let (Value::Frame(l), Value::Frame(r)) = (left, right) {
            let same = l.same_function(self.host, r);
            let result = match op {
                BinaryOp::Eq => same,
                BinaryOp::NotEq => !same,
                _ => return Err(type_mismatch("value", "frame")),
            };
            return Ok(Value::Object(self.host.from_i64(i64::from(result), None)?));
        }
        let (l, r) = (self.object(left)?, self.object(right)?);
        let result = match op {
            BinaryOp::Index => self.host.index(l, r)?,
            _ => self.host.binary(op, l, r)?,
        };
        Ok(Value::Object(result))
    }

    /// Truth of `left op right`.
    pub fn compare(&self, op: BinaryOp, left: &Value<H>, right: &Value<H>) -> EvalResult<bool> {
        let result = self.apply_binary(op, left, right)?;
        self.truthy(&result)
    }

    /// Field `name` of a scope value: a struct member or a frame local.
    pub fn member(&self, scope: &Value<H>, name: &str) -> EvalResult<Value<H>> {
        match scope {
            Value::Object(object) => self.host.field(object, name).map(Value::Object),
            Value::Frame(frame) => frame.lookup(self.host, name).map(Value::Object),
            _ => Err(undefined_field(name)),
        }
    }

    /// The object a method would be called on: references and one level
    /// of pointer stripped.
    pub fn receiver(&self, object: &H::Object) -> H::Object {
        let mut target = object.clone();
        if self.host.is_reference(&target) {
            if let Ok(referenced) = self.host.referenced_value(&target) {
                target = referenced;
            }
        }
        if self.host.is_pointer(&target) {
            if let Ok(pointee) = self.host.dereference(&target) {
                target = pointee;
            }
        }
        target
    }

    /// A bound method `name` of a scope value, if its type has one.
    pub fn method_caller(&self, scope: &Value<H>, name: &str) -> Option<MethodCaller<H>> {
        let receiver = self.receiver(scope.as_object()?);
        let type_name = self.host.type_name(&receiver);
        let known = self.host.has_method(&receiver, name)
            || self
                .dispatcher
                .resolve(self.host, &type_name, name)
                .is_some();
        known.then(|| MethodCaller::new(receiver, name, type_name))
    }

    /// Pointee of a pointer value.
    pub fn dereference(&self, value: &Value<H>) -> EvalResult<Value<H>> {
        match value {
            Value::Object(object) => self.host.dereference(object).map(Value::Object),
            _ => Err(type_mismatch("pointer", value.kind_name())),
        }
    }

    /// Call `callee` (spelled `label` in the query) with `args`.
    pub fn invoke(&self, label: &str, callee: &Value<H>, args: &[Value<H>]) -> EvalResult<Value<H>> {
        match callee {
            Value::Builtin(builtin @ (Builtin::SizeOf | Builtin::Frame)) => {
                let [arg] = args else {
                    return Err(type_mismatch(
                        "one argument",
                        &format!("{} arguments", args.len()),
                    ));
                };
                let arg = self.object(arg)?;
                if *builtin == Builtin::SizeOf {
                    Ok(Value::Object(self.host.size_of(arg)?))
                } else {
                    let index = self.host.to_i64(arg)?;
                    Ok(Value::Frame(get_frame(self.host, index)?))
                }
            }
            Value::Method(caller) => {
                let args = self.objects(args)?;
                Ok(Value::Object(caller.invoke(
                    self.host,
                    self.dispatcher,
                    &args,
                )?))
            }
            Value::Object(function) => {
                let args = self.objects(args)?;
                let result = if self.host.is_internal_function(function)
                    && !self.host.supports_internal_calls()
                {
                    self.host.call_by_name(label, &args)?
                } else {
                    self.host.call(function, &args)?
                };
                Ok(Value::Object(result))
            }
            Value::Builtin(Builtin::FramesNo) | Value::Frame(_) => Err(not_callable(label)),
        }
    }
}
