//! Identifier resolution.
//!
//! A name is tried as, in order:
//! 1. a field, then a method, of each scope value from the innermost out
//! 2. an alias or enumerate binding
//! 3. a variable of the target program
//! 4. the function of a frame on the call stack
//! 5. a builtin (`sizeof`, `frames_no`, `frame`)
//! 6. an expression for the target's own evaluator
//!
//! The first strategy that succeeds is remembered in the node, so a name
//! evaluated again inside a loop goes straight to its source. Bindings are
//! never remembered: they change while a query runs.

use duel_ir::{Builtin, Ident, IdentKind};
use tracing::trace;

use crate::context::EvalContext;
use crate::errors::{undefined, EvalResult};
use crate::frames::{count_frames, find_frame};
use crate::host::Host;
use crate::value::Value;

pub(crate) fn resolve<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    ident: &Ident,
) -> EvalResult<Value<H>> {
    match ident.resolved() {
        Some(kind) => resolve_as(ctx, &ident.name, kind),
        None => resolve_first(ctx, ident),
    }
}

fn resolve_first<'a, H: Host + 'a>(ctx: EvalContext<'a, H>, ident: &Ident) -> EvalResult<Value<H>> {
    let name = ident.name.as_str();

    for depth in (0..ctx.scopes.depth()).rev() {
        let Some(scope) = ctx.scopes.get(depth) else {
            continue;
        };
        if let Ok(value) = ctx.member(&scope, name) {
            trace!(name, depth, "resolved as scope field");
            ident.remember(IdentKind::ScopeField { depth });
            return Ok(value);
        }
        if let Some(caller) = ctx.method_caller(&scope, name) {
            trace!(name, depth, "resolved as method");
            ident.remember(IdentKind::Method { depth });
            return Ok(Value::Method(caller));
        }
    }

    if let Some((_, value)) = ctx.bindings.get(name) {
        trace!(name, "resolved as binding");
        return Ok(value);
    }

    let kind = if ctx.host.lookup_variable(name).is_some() {
        IdentKind::Symbol
    } else if find_frame(ctx.host, name).is_some() {
        IdentKind::Frame
    } else if let Some(builtin) = Builtin::from_name(name) {
        IdentKind::Builtin(builtin)
    } else {
        IdentKind::RawFallback
    };
    let value = resolve_as(ctx, name, kind)?;
    trace!(name, ?kind, "resolved");
    ident.remember(kind);
    Ok(value)
}

fn resolve_as<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    name: &str,
    kind: IdentKind,
) -> EvalResult<Value<H>> {
    match kind {
        IdentKind::ScopeField { depth } => {
            let scope = ctx.scopes.get(depth).ok_or_else(|| undefined(name))?;
            ctx.member(&scope, name)
        }
        IdentKind::Method { depth } => ctx
            .scopes
            .get(depth)
            .and_then(|scope| ctx.method_caller(&scope, name))
            .map(Value::Method)
            .ok_or_else(|| undefined(name)),
        IdentKind::Symbol => ctx
            .host
            .lookup_variable(name)
            .map(Value::Object)
            .ok_or_else(|| undefined(name)),
        IdentKind::Frame => find_frame(ctx.host, name)
            .map(Value::Frame)
            .ok_or_else(|| undefined(name)),
        IdentKind::Builtin(Builtin::FramesNo) => {
            let count = i64::try_from(count_frames(ctx.host)).unwrap_or(i64::MAX);
            ctx.host.from_i64(count, None).map(Value::Object)
        }
        IdentKind::Builtin(builtin) => Ok(Value::Builtin(builtin)),
        IdentKind::RawFallback => ctx
            .host
            .parse_and_eval(name)
            .map(Value::Object)
            .map_err(|_| undefined(name)),
    }
}

#[cfg(test)]
mod tests;
