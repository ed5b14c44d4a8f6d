//! `f(a, b, ...)`.
//!
//! Every argument is a stream, so a call is made once per combination of
//! argument results, like an odometer: the last argument turns fastest.
//! When an argument runs out it is reopened and the one before it moves
//! on; when the first one runs out, the next callee result is taken.

use duel_ir::{label, ListExpr};

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::{Item, Value};

/// Argument cursors for one callee.
struct Odometer<'a, H: Host> {
    callee_label: String,
    callee: Value<H>,
    streams: Vec<Stream<'a, H>>,
    labels: Vec<String>,
    values: Vec<Value<H>>,
    started: bool,
}

impl<'a, H: Host + 'a> Odometer<'a, H> {
    fn new((callee_label, callee): Item<H>) -> Self {
        Odometer {
            callee_label,
            callee,
            streams: Vec::new(),
            labels: Vec::new(),
            values: Vec::new(),
            started: false,
        }
    }

    /// Open the arguments to the right of the last live one and take their
    /// first results. False if one of them is empty.
    fn fill(&mut self, ctx: EvalContext<'a, H>, args: &'a ListExpr) -> EvalResult<bool> {
        while let Some(arg) = args.items.get(self.streams.len()) {
            args.set_active(self.streams.len());
            let mut stream = ctx.eval(arg);
            let Some((label, value)) = stream.next().transpose()? else {
                return Ok(false);
            };
            self.streams.push(stream);
            self.labels.push(label);
            self.values.push(value);
        }
        Ok(true)
    }

    /// Move the rightmost argument that still has results. False when all
    /// are exhausted.
    fn step(&mut self) -> EvalResult<bool> {
        while let Some(stream) = self.streams.last_mut() {
            if let Some((label, value)) = stream.next().transpose()? {
                if let (Some(l), Some(v)) = (self.labels.last_mut(), self.values.last_mut()) {
                    *l = label;
                    *v = value;
                }
                return Ok(true);
            }
            self.streams.pop();
            self.labels.pop();
            self.values.pop();
        }
        Ok(false)
    }

    fn turn(&mut self, ctx: EvalContext<'a, H>, args: &'a ListExpr) -> EvalResult<bool> {
        if !self.started {
            self.started = true;
            return self.fill(ctx, args);
        }
        Ok(self.step()? && self.fill(ctx, args)?)
    }
}

pub(super) struct Call<'a, H: Host> {
    ctx: EvalContext<'a, H>,
    callees: Stream<'a, H>,
    args: &'a ListExpr,
    current: Option<Odometer<'a, H>>,
}

impl<'a, H: Host + 'a> Call<'a, H> {
    pub(super) fn new(
        ctx: EvalContext<'a, H>,
        callees: Stream<'a, H>,
        args: &'a ListExpr,
    ) -> Self {
        Call {
            ctx,
            callees,
            args,
            current: None,
        }
    }

    fn advance(&mut self) -> EvalResult<Option<Item<H>>> {
        loop {
            if let Some(odometer) = self.current.as_mut() {
                if odometer.turn(self.ctx, self.args)? {
                    let value =
                        self.ctx
                            .invoke(&odometer.callee_label, &odometer.callee, &odometer.values)?;
                    let name = label::call(&odometer.callee_label, &odometer.labels.join(","));
                    return Ok(Some((name, value)));
                }
            }
            let Some(callee) = self.callees.next().transpose()? else {
                return Ok(None);
            };
            self.current = Some(Odometer::new(callee));
        }
    }
}

impl<'a, H: Host + 'a> Iterator for Call<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
