//! The scope stack.
//!
//! `x.f`, `x => f`, `x-->f` and `x@f` evaluate `f` with each value of `x`
//! pushed here; identifiers look for fields of the pushed values first
//! and `_`, `__`, ... read them directly. A push is held by a
//! [`ScopeGuard`] for the duration of a single `next()` of the inner
//! stream, so the stack is balanced on every exit path: exhaustion,
//! abandonment, error or panic.

use std::cell::RefCell;

use crate::host::Host;
use crate::value::Value;

/// Values pushed by enclosing scoped evaluations, innermost last.
pub struct ScopeStack<H: Host> {
    values: RefCell<Vec<Value<H>>>,
}

impl<H: Host> Default for ScopeStack<H> {
    fn default() -> Self {
        ScopeStack {
            values: RefCell::new(Vec::new()),
        }
    }
}

impl<H: Host> ScopeStack<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn push(&self, value: Value<H>) {
        self.values.borrow_mut().push(value);
    }

    pub fn pop(&self) -> Option<Value<H>> {
        self.values.borrow_mut().pop()
    }

    /// Value at `depth`, counted from the bottom.
    pub fn get(&self, depth: usize) -> Option<Value<H>> {
        self.values.borrow().get(depth).cloned()
    }

    /// Value `n` levels from the top; `n == 1` is the innermost.
    pub fn from_top(&self, n: usize) -> Option<Value<H>> {
        if n == 0 {
            return None;
        }
        let values = self.values.borrow();
        let depth = values.len().checked_sub(n)?;
        values.get(depth).cloned()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }

    /// Push `value` until the returned guard is dropped.
    #[must_use = "the scope is popped as soon as the guard is dropped"]
    pub fn guard(&self, value: Value<H>) -> ScopeGuard<'_, H> {
        self.push(value);
        ScopeGuard { scopes: self }
    }
}

/// Pops its scope on drop.
pub struct ScopeGuard<'a, H: Host> {
    scopes: &'a ScopeStack<H>,
}

impl<H: Host> Drop for ScopeGuard<'_, H> {
    fn drop(&mut self) {
        self.scopes.pop();
    }
}
