//! Node evaluators.
//!
//! Every node evaluates to a [`Stream`]: a lazy, single-use iterator of
//! `(label, value)` results. Building a stream evaluates nothing; work
//! happens one result at a time as the consumer pulls. Combinators hold
//! their children's streams and pull from them on demand, so an infinite
//! child (`0..`) is fine as long as something above it stops pulling.
//!
//! Simple one-to-one nodes are iterator adapters here; the nodes that
//! need explicit state live in their own modules:
//! - [`product`]: Cartesian traversal behind binary operators, filters,
//!   field descent and `=>`
//! - [`walk`]: `-->`
//! - [`take_nth`]: `[[ ]]`
//! - [`until`]: `@` / `@@`
//! - [`range`]: `..`
//! - [`grouping`]: `+/`, `#/`, `&&/`, `||/`
//! - [`ternary`]: `?:` and `if`
//! - [`call`]: function calls

mod call;
mod grouping;
mod product;
mod range;
mod ternary;
mod take_nth;
mod until;
mod walk;

use std::iter;

use duel_ir::{label, Expr, ExprKind, Span};
use duel_stack::ensure_sufficient_stack;

use crate::context::EvalContext;
use crate::errors::{no_scope, EvalError, EvalResult};
use crate::host::Host;
use crate::ident;
use crate::scope::ScopeStack;
use crate::value::{Item, Value};

use self::product::Product;

/// Lazy stream of results.
///
/// Errors carry the span of the innermost node that produced them. After
/// yielding an error the stream is finished.
pub struct Stream<'a, H: Host> {
    inner: Box<dyn Iterator<Item = EvalResult<Item<H>>> + 'a>,
    span: Span,
    failed: bool,
}

impl<'a, H: Host + 'a> Stream<'a, H> {
    pub fn new(iter: impl Iterator<Item = EvalResult<Item<H>>> + 'a) -> Self {
        Stream {
            inner: Box::new(iter),
            span: Span::DUMMY,
            failed: false,
        }
    }

    pub fn empty() -> Self {
        Stream::new(iter::empty())
    }

    /// A stream whose only element is `err`.
    pub fn fail(err: EvalError) -> Self {
        Stream::new(iter::once(Err(err)))
    }

    fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl<'a, H: Host + 'a> Iterator for Stream<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match ensure_sufficient_stack(|| self.inner.next()) {
            Some(Err(err)) => {
                self.failed = true;
                let err = if self.span == Span::DUMMY {
                    err
                } else {
                    err.with_span(self.span)
                };
                Some(Err(err))
            }
            other => other,
        }
    }
}

/// Runs every step of `inner` with `value` pushed on the scope stack.
pub struct Scoped<'a, H: Host> {
    scopes: &'a ScopeStack<H>,
    value: Value<H>,
    inner: Stream<'a, H>,
}

impl<'a, H: Host + 'a> Scoped<'a, H> {
    pub fn new(scopes: &'a ScopeStack<H>, value: Value<H>, inner: Stream<'a, H>) -> Self {
        Scoped {
            scopes,
            value,
            inner,
        }
    }
}

impl<'a, H: Host + 'a> Iterator for Scoped<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        let _guard = self.scopes.guard(self.value.clone());
        self.inner.next()
    }
}

pub(crate) fn eval<'a, H: Host + 'a>(ctx: EvalContext<'a, H>, expr: &'a Expr) -> Stream<'a, H> {
    let stream = match &expr.kind {
        ExprKind::Literal(literal) => Stream::new(iter::once_with(move || {
            let value = ctx.host.literal(literal)?;
            Ok((literal.text.clone(), Value::Object(value)))
        })),
        ExprKind::Ident(name) => Stream::new(iter::once_with(move || {
            ident::resolve(ctx, name).map(|value| (name.name.clone(), value))
        })),
        ExprKind::Underscore(n) => {
            let n = *n;
            Stream::new(iter::once_with(move || {
                let value = ctx.scopes.from_top(n).ok_or_else(|| no_scope(n))?;
                Ok((ctx.text(&value), value))
            }))
        }
        ExprKind::Unary { op, operand } => {
            let op = *op;
            Stream::new(ctx.eval(operand).map(move |item| -> EvalResult<Item<H>> {
                let (name, value) = item?;
                let result = ctx.host.unary(op, ctx.object(&value)?)?;
                Ok((label::unary(op, &name), Value::Object(result)))
            }))
        }
        ExprKind::Postfix { op, operand } => {
            let op = *op;
            Stream::new(ctx.eval(operand).map(move |item| -> EvalResult<Item<H>> {
                let (name, value) = item?;
                let result = ctx.host.postfix(op, ctx.object(&value)?)?;
                Ok((label::postfix(op, &name), Value::Object(result)))
            }))
        }
        ExprKind::Parens(inner) => Stream::new(ctx.eval(inner).map(move |item| {
            item.map(|(name, value)| {
                if inner.no_parens() {
                    (name, value)
                } else {
                    (label::parens(&name), value)
                }
            })
        })),
        ExprKind::Curlies(inner) => Stream::new(
            ctx.eval(inner)
                .map(move |item| item.map(|(_, value)| (ctx.text(&value), value))),
        ),
        ExprKind::Binary { op, left, right } => {
            let op = *op;
            Stream::new(Product::new(
                ctx,
                ctx.eval(left),
                right,
                false,
                move |(lname, lvalue), (rname, rvalue)| {
                    let value = ctx.apply_binary(op, lvalue, &rvalue)?;
                    Ok(Some((label::binary(op, lname, &rname), value)))
                },
            ))
        }
        ExprKind::Filter { op, left, right } => {
            let op = *op;
            Stream::new(Product::new(
                ctx,
                ctx.eval(left),
                right,
                false,
                move |(lname, lvalue), (rname, rvalue)| {
                    if !ctx.compare(op.comparison(), lvalue, &rvalue)? {
                        return Ok(None);
                    }
                    Ok(Some((label::filter(op, lname, &rname), lvalue.clone())))
                },
            ))
        }
        ExprKind::Struct { op, left, right } => {
            let op = *op;
            Stream::new(Product::new(
                ctx,
                ctx.eval(left),
                right,
                true,
                move |(lname, _), (rname, rvalue)| {
                    Ok(Some((label::structure(op, lname, &rname), rvalue)))
                },
            ))
        }
        ExprKind::Foreach { left, right } => Stream::new(Product::new(
            ctx,
            ctx.eval(left),
            right,
            true,
            |_, item| Ok(Some(item)),
        )),
        ExprKind::StructWalk { left, right } => {
            Stream::new(walk::Walk::new(ctx, ctx.eval(left), right))
        }
        ExprKind::TakeNth { seq, index } => {
            Stream::new(take_nth::TakeNth::new(ctx, seq, index))
        }
        ExprKind::Until { left, right, .. } => {
            Stream::new(until::Until::new(ctx, ctx.eval(left), right))
        }
        ExprKind::URange { bound, to } => range::urange(ctx, bound, *to),
        ExprKind::BiRange { from, to } => range::birange(ctx, from, to),
        ExprKind::EagerGrouping { fold, operand, .. } => {
            grouping::eager(ctx, *fold, expr, operand)
        }
        ExprKind::LazyGrouping { fold, operand, .. } => grouping::lazy(ctx, *fold, expr, operand),
        ExprKind::Ternary {
            form,
            cond,
            then,
            otherwise,
        } => ternary::ternary(ctx, *form, cond, then, otherwise.as_deref()),
        ExprKind::Alias { name, value } => {
            let name = name.name();
            Stream::new(ctx.eval(value).map(move |item| -> EvalResult<Item<H>> {
                let (bound_label, value) = item?;
                let value = match value.as_object().and_then(|o| ctx.host.reference_to(o)) {
                    Some(reference) => Value::Object(reference),
                    None => value,
                };
                ctx.bindings.bind(name.clone(), bound_label, value.clone());
                Ok((name.clone(), value))
            }))
        }
        ExprKind::Enumerate { seq, index_name } => {
            let name = index_name.name();
            Stream::new(ctx.eval(seq).enumerate().map(
                move |(i, item)| -> EvalResult<Item<H>> {
                    let item = item?;
                    let n = i64::try_from(i).unwrap_or(i64::MAX);
                    let index = ctx.host.from_i64(n, None)?;
                    ctx.bindings
                        .bind(name.clone(), i.to_string(), Value::Object(index));
                    Ok(item)
                },
            ))
        }
        ExprKind::List(list) => Stream::new(list.items.iter().enumerate().flat_map(
            move |(i, item)| {
                list.set_active(i);
                ctx.eval(item)
            },
        )),
        ExprKind::Statement(items) => match items.split_last() {
            Some((last, init)) => {
                let prelude = iter::once_with(move || -> EvalResult<()> {
                    for item in init {
                        for result in ctx.eval(item) {
                            result?;
                        }
                    }
                    Ok(())
                })
                .filter_map(|done| done.err().map(Err));
                Stream::new(prelude.chain(ctx.eval(last)))
            }
            None => Stream::empty(),
        },
        ExprKind::Call { callee, args } => {
            Stream::new(call::Call::new(ctx, ctx.eval(callee), args))
        }
    };
    stream.at(expr.span)
}
