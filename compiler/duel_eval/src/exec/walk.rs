//! `-->`: depth-first walk of a linked structure.
//!
//! `head-->next` yields `head`, then `head->next`, `head->next->next`, ...
//! until a null. With several children per step (`root-->(left,right)`) the
//! children of the node just yielded are visited before older pending
//! entries, so the order is preorder depth-first.

use duel_ir::{label, Expr};

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::{Item, Value};

/// A pending position: the labels of each step from the start, and the
/// value reached.
type Path<H> = (Vec<String>, Value<H>);

pub(super) struct Walk<'a, H: Host> {
    ctx: EvalContext<'a, H>,
    starts: Stream<'a, H>,
    step: &'a Expr,
    /// Unvisited positions; the next one is at the end.
    pending: Vec<Path<H>>,
    /// The position last yielded, expanded on the following pull.
    last: Option<Path<H>>,
}

impl<'a, H: Host + 'a> Walk<'a, H> {
    pub(super) fn new(ctx: EvalContext<'a, H>, starts: Stream<'a, H>, step: &'a Expr) -> Self {
        Walk {
            ctx,
            starts,
            step,
            pending: Vec::new(),
            last: None,
        }
    }

    fn expand(&mut self, (path, value): Path<H>) -> EvalResult<()> {
        let target = self.ctx.dereference(&value)?;
        let at = self.pending.len();
        for child in self.ctx.eval_scoped(target, self.step) {
            let (name, child) = child?;
            let mut child_path = path.clone();
            child_path.push(name);
            self.pending.insert(at, (child_path, child));
        }
        Ok(())
    }

    fn advance(&mut self) -> EvalResult<Option<Item<H>>> {
        if let Some(last) = self.last.take() {
            self.expand(last)?;
        }
        loop {
            if let Some((path, value)) = self.pending.pop() {
                if !self.ctx.truthy(&value)? {
                    continue;
                }
                let item = (label::walk_path(&path), value.clone());
                self.last = Some((path, value));
                return Ok(Some(item));
            }
            let Some((name, value)) = self.starts.next().transpose()? else {
                return Ok(None);
            };
            self.pending.push((vec![name], value));
        }
    }
}

impl<'a, H: Host + 'a> Iterator for Walk<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
