//! `s[[i]]`: the i-th result of `s`.
//!
//! Indices are 0-based; negative ones count from the end, which costs one
//! full extra pass over `s` to learn its length. Increasing indices reuse
//! the open stream of `s` and skip forward; any other index reopens it.

use duel_ir::{label, Expr, ExprKind};
use tracing::trace;

use super::Stream;
use crate::context::EvalContext;
use crate::errors::{index_out_of_range, EvalResult};
use crate::host::Host;
use crate::value::Item;

pub(super) struct TakeNth<'a, H: Host> {
    ctx: EvalContext<'a, H>,
    seq: &'a Expr,
    indices: Stream<'a, H>,
    /// Show `{i}` indices by their resolved position.
    resolved_labels: bool,
    len: Option<i64>,
    cursor: Option<Stream<'a, H>>,
    /// Position of the last result taken from `cursor`.
    position: i64,
}

impl<'a, H: Host + 'a> TakeNth<'a, H> {
    pub(super) fn new(ctx: EvalContext<'a, H>, seq: &'a Expr, index: &'a Expr) -> Self {
        TakeNth {
            ctx,
            seq,
            indices: ctx.eval(index),
            resolved_labels: matches!(index.kind, ExprKind::Curlies(_)),
            len: None,
            cursor: None,
            position: -1,
        }
    }

    fn total_len(&mut self) -> EvalResult<i64> {
        if let Some(len) = self.len {
            return Ok(len);
        }
        let mut len = 0i64;
        for item in self.ctx.eval(self.seq) {
            item?;
            len += 1;
        }
        self.len = Some(len);
        Ok(len)
    }

    fn advance(&mut self) -> EvalResult<Option<Item<H>>> {
        let Some((mut index_label, index)) = self.indices.next().transpose()? else {
            return Ok(None);
        };
        let mut index = self.ctx.host.to_i64(self.ctx.object(&index)?)?;
        if index < 0 {
            index += self.total_len()?;
            if self.resolved_labels {
                index_label = index.to_string();
            }
            if index < 0 {
                return Err(index_out_of_range("take-nth", index));
            }
        }

        if self.cursor.is_none() || index <= self.position {
            if self.cursor.is_some() {
                trace!(index, previous = self.position, "take-nth restarts its sequence");
            }
            self.cursor = Some(self.ctx.eval(self.seq));
            self.position = -1;
        }
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };
        while self.position < index - 1 {
            if cursor.next().transpose()?.is_none() {
                return Ok(None);
            }
            self.position += 1;
        }
        let Some((_, value)) = cursor.next().transpose()? else {
            return Ok(None);
        };
        self.position = index;
        Ok(Some((label::take_nth(&self.seq.name(), &index_label), value)))
    }
}

impl<'a, H: Host + 'a> Iterator for TakeNth<'a, H> {
    type Item = EvalResult<Item<H>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}
