//! Folds over a whole stream: `#/`, `+/`, `&&/`, `||/` and their keyword
//! spellings. Each yields one result labelled with the node's own name.

use std::iter;

use duel_ir::{BinaryOp, EagerFold, Expr, LazyFold};

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::{Item, Value};

/// Count or sum of every result.
pub(super) fn eager<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    fold: EagerFold,
    node: &'a Expr,
    operand: &'a Expr,
) -> Stream<'a, H> {
    Stream::new(iter::once_with(move || -> EvalResult<Item<H>> {
        let folded = match fold {
            EagerFold::Count => {
                let mut count = 0i64;
                for item in ctx.eval(operand) {
                    item?;
                    count += 1;
                }
                ctx.host.from_i64(count, None)?
            }
            EagerFold::Sum => {
                let mut sum = ctx.host.from_i64(0, None)?;
                for item in ctx.eval(operand) {
                    let (_, value) = item?;
                    sum = ctx.host.binary(BinaryOp::Add, &sum, ctx.object(&value)?)?;
                }
                sum
            }
        };
        Ok((node.name(), Value::Object(folded)))
    }))
}

/// All/any, stopping at the first result that decides the answer.
pub(super) fn lazy<'a, H: Host + 'a>(
    ctx: EvalContext<'a, H>,
    fold: LazyFold,
    node: &'a Expr,
    operand: &'a Expr,
) -> Stream<'a, H> {
    Stream::new(iter::once_with(move || -> EvalResult<Item<H>> {
        let initial = fold.initial();
        let mut acc = initial;
        for item in ctx.eval(operand) {
            let (_, value) = item?;
            let truth = ctx.truthy(&value)?;
            acc = match fold {
                LazyFold::All => acc && truth,
                LazyFold::Any => acc || truth,
            };
            if acc != initial {
                break;
            }
        }
        let folded = ctx.host.from_i64(i64::from(acc), None)?;
        Ok((node.name(), Value::Object(folded)))
    }))
}
