//! `..b`, `a..` and `a..b`.
//!
//! Generated numbers take the type of the bound they start from and are
//! labelled by their own value.

use duel_ir::Expr;

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::{Item, Value};

/// `..b` counts `0, 1, .., b-1`; `a..` counts up from `a` without end.
pub(super) fn urange<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    bound: &'a Expr,
    to: bool,
) -> Stream<'a, H> {
    Stream::new(
        ctx.eval(bound)
            .flat_map(move |item| open_range(ctx, item, to).unwrap_or_else(Stream::fail)),
    )
}

fn open_range<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    item: EvalResult<Item<H>>,
    to: bool,
) -> EvalResult<Stream<'a, H>> {
    let (_, bound) = item?;
    let seed = ctx.object(&bound)?.clone();
    let bound = ctx.host.to_i64(&seed)?;
    let span = if to { 0..bound } else { bound..i64::MAX };
    Ok(Stream::new(span.map(move |i| numbered(ctx, i, &seed))))
}

/// `a..b` for every pair of bounds, inclusive, counting down when
/// `a > b`.
pub(super) fn birange<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    from: &'a Expr,
    to: &'a Expr,
) -> Stream<'a, H> {
    Stream::new(ctx.eval(from).flat_map(move |start| match start {
        Ok((_, start)) => Stream::new(
            ctx.eval(to)
                .flat_map(move |end| closed_range(ctx, &start, end).unwrap_or_else(Stream::fail)),
        ),
        Err(err) => Stream::fail(err),
    }))
}

fn closed_range<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    start: &Value<H>,
    end: EvalResult<Item<H>>,
) -> EvalResult<Stream<'a, H>> {
    let (_, end) = end?;
    let seed = ctx.object(start)?.clone();
    let from = ctx.host.to_i64(&seed)?;
    let to = ctx.host.to_i64(ctx.object(&end)?)?;
    let steps: Box<dyn Iterator<Item = i64>> = if from < to {
        Box::new(from..=to)
    } else {
        Box::new((to..=from).rev())
    };
    Ok(Stream::new(steps.map(move |i| numbered(ctx, i, &seed))))
}

fn numbered<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    n: i64,
    seed: &H::Object,
) -> EvalResult<Item<H>> {
    let value = Value::Object(ctx.host.from_i64(n, Some(seed))?);
    Ok((ctx.text(&value), value))
}
