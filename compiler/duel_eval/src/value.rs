//! Values flowing through query streams.

use std::fmt;

use duel_ir::Builtin;

use crate::frames::Frame;
use crate::host::Host;
use crate::resolvers::MethodCaller;

/// One element of a result stream: a label and a value.
pub type Item<H> = (String, Value<H>);

/// A target value, or one of the evaluator's own handles.
pub enum Value<H: Host> {
    Object(H::Object),
    Frame(Frame<H>),
    /// A member function bound to its receiver.
    Method(MethodCaller<H>),
    /// `sizeof` or `frame`, waiting for an argument.
    Builtin(Builtin),
}

impl<H: Host> Value<H> {
    pub fn as_object(&self) -> Option<&H::Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Short description of the value's category, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "value",
            Value::Frame(_) => "frame",
            Value::Method(_) => "method",
            Value::Builtin(_) => "builtin function",
        }
    }

    /// Display text. References are followed before rendering.
    pub fn text(&self, host: &H) -> String {
        match self {
            Value::Object(object) => {
                if host.is_reference(object) {
                    if let Ok(target) = host.referenced_value(object) {
                        return host.render(&target);
                    }
                }
                host.render(object)
            }
            Value::Frame(frame) => frame.describe(host),
            Value::Method(caller) => caller.to_string(),
            Value::Builtin(builtin) => format!("<builtin {}>", builtin.name()),
        }
    }
}

impl<H: Host> Clone for Value<H> {
    fn clone(&self) -> Self {
        match self {
            Value::Object(object) => Value::Object(object.clone()),
            Value::Frame(frame) => Value::Frame(frame.clone()),
            Value::Method(caller) => Value::Method(caller.clone()),
            Value::Builtin(builtin) => Value::Builtin(*builtin),
        }
    }
}

impl<H: Host> fmt::Debug for Value<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(object) => f.debug_tuple("Object").field(object).finish(),
            Value::Frame(frame) => f.debug_tuple("Frame").field(frame).finish(),
            Value::Method(caller) => f.debug_tuple("Method").field(caller).finish(),
            Value::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
        }
    }
}
