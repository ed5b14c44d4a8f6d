//! Cartesian traversal: for each left item, every item of a fresh right
//! stream. Left varies slowest.

use duel_ir::Expr;

use super::Stream;
use crate::context::EvalContext;
use crate::errors::EvalResult;
use crate::host::Host;
use crate::value::Item;

pub(super) struct Product<'a, H: Host, F> {
    ctx: EvalContext<'a, H>,
    left: Stream<'a, H>,
    right: &'a Expr,
    /// Evaluate the right side with the left value pushed as a scope.
    scoped: bool,
    current: Option<(Item<H>, Stream<'a, H>)>,
    combine: F,
}

impl<'a, H, F> Product<'a, H, F>
where
    H: Host + 'a,
    F: FnMut(&Item<H>, Item<H>) -> EvalResult<Option<Item<H>>>,
{
    pub(super) fn new(
        ctx: EvalContext<'a, H>,
        left: Stream<'a, H>,
        right: &'a Expr,
        scoped: bool,
        combine: F,
    ) -> Self {
        Product {
            ctx,
            left,
            right,
            scoped,
            current: None,
            combine,
        }
    }

    fn advance(&mut self) -> EvalResult<Option<Item<H>>> {
        loop {
            if let Some((left, right)) = self.current.as_mut() {
                if let Some(item) = right.next().transpose()? {
                    match (self.combine)(left, item)? {
                        Some(out) => return Ok(Some(out)),
                        None => continue,
                    }
                }
            }
            let Some(left) = self.left.next().transpose()? else {
                return Ok(None);
            };
            let right = if self.scoped {
                self.ctx.eval_scoped(left.1.clone(), self.right)
            } else {
                self.ctx.eval(self.right)
            };
            self.current = Some((left, right));
        }
    }
}

impl<'a, H, F> Iterator for Product<'a, H, F>
where
    H: Host + 'a,
    F: FnMut(&Item<H>, Item<H>) -> EvalResult<Option<Item<H>>>,
{
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
