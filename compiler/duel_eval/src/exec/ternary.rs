//! `c ? a : b`, `if (c) a`, `if (c) a else b`.
//!
//! With an else branch, every combination of condition, then and else
//! results is yielded, taking the value of the branch the condition picks.
//! Without one, false conditions yield nothing and their branch is not
//! evaluated.

use duel_ir::{label, Expr, TernaryForm};

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::Item;

pub(super) fn ternary<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    form: TernaryForm,
    cond: &'a Expr,
    then: &'a Expr,
    otherwise: Option<&'a Expr>,
) -> Stream<'a, H> {
    Stream::new(ctx.eval(cond).flat_map(move |item| {
        branches(ctx, form, item, then, otherwise).unwrap_or_else(Stream::fail)
    }))
}

fn branches<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    form: TernaryForm,
    cond: EvalResult<Item<H>>,
    then: &'a Expr,
    otherwise: Option<&'a Expr>,
) -> EvalResult<Stream<'a, H>> {
    let (cond_label, cond) = cond?;
    let truth = ctx.truthy(&cond)?;
    let Some(otherwise) = otherwise else {
        if !truth {
            return Ok(Stream::empty());
        }
        return Ok(Stream::new(ctx.eval(then).map(move |item| {
            item.map(|(then_label, value)| {
                (label::ternary(form, &cond_label, &then_label, None), value)
            })
        })));
    };
    Ok(Stream::new(ctx.eval(then).flat_map(move |item| {
        let cond_label = cond_label.clone();
        match item {
            Ok((then_label, then_value)) => Stream::new(ctx.eval(otherwise).map(move |item| {
                item.map(|(else_label, else_value)| {
                    let name =
                        label::ternary(form, &cond_label, &then_label, Some(&else_label));
                    let value = if truth { then_value.clone() } else { else_value };
                    (name, value)
                })
            })),
            Err(err) => Stream::fail(err),
        }
    })))
}
