//! Alias and enumerate bindings.
//!
//! `name := expr` and `expr#name` store `(label, value)` under `name`;
//! identifiers read them back. Visibility is dynamic: a binding made by
//! any node is seen by every node evaluated after it, until the owning
//! session clears the table.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::host::Host;
use crate::value::Value;

pub struct Bindings<H: Host> {
    entries: RefCell<FxHashMap<String, (String, Value<H>)>>,
}

impl<H: Host> Default for Bindings<H> {
    fn default() -> Self {
        Bindings {
            entries: RefCell::new(FxHashMap::default()),
        }
    }
}

impl<H: Host> Bindings<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier binding.
    pub fn bind(&self, name: impl Into<String>, label: String, value: Value<H>) {
        self.entries.borrow_mut().insert(name.into(), (label, value));
    }

    pub fn get(&self, name: &str) -> Option<(String, Value<H>)> {
        self.entries.borrow().get(name).cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
