//! `s@c`: results of `s` up to the first one that meets `c`.
//!
//! `c` is evaluated with each item of `s` as scope. A literal `c` is met
//! when it equals the item (`s@0` stops at a zero); anything else is met
//! when it is true (`s@(_ > 5)`). The item that meets it is not yielded.

use duel_ir::{BinaryOp, Expr};

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::Item;

pub(super) struct Until<'a, H: Host> {
    ctx: EvalContext<'a, H>,
    items: Stream<'a, H>,
    cond: &'a Expr,
    done: bool,
}

impl<'a, H: Host + 'a> Until<'a, H> {
    pub(super) fn new(ctx: EvalContext<'a, H>, items: Stream<'a, H>, cond: &'a Expr) -> Self {
        Until {
            ctx,
            items,
            cond,
            done: false,
        }
    }

    fn advance(&mut self) -> EvalResult<Option<Item<H>>> {
        while !self.done {
            let Some((name, value)) = self.items.next().transpose()? else {
                return Ok(None);
            };
            let (mut stop, mut output) = (false, false);
            for signal in self.ctx.eval_scoped(value.clone(), self.cond) {
                let (_, signal) = signal?;
                let met = if self.cond.is_literal() {
                    self.ctx.compare(BinaryOp::Eq, &value, &signal)?
                } else {
                    self.ctx.truthy(&signal)?
                };
                if met {
                    stop = true;
                } else {
                    output = true;
                }
                if stop && output {
                    break;
                }
            }
            self.done = stop;
            if output {
                return Ok(Some((name, value)));
            }
        }
        Ok(None)
    }
}

impl<'a, H: Host + 'a> Iterator for Until<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
