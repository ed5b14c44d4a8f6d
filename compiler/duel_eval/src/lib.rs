//! Duel Eval - lazy evaluator for duel queries.
//!
//! A query evaluates to a stream of `(label, value)` results. The label
//! spells out where each value came from (`x[3]`, `head->next->val`,
//! `arr[[2]]`) and re-parses into a query for that value alone.
//!
//! # Architecture
//!
//! - [`Host`]: the inspected program. Values are opaque `H::Object`s;
//!   operators, fields, pointers and the call stack all go through it.
//! - [`Value`]: a host object, or a frame, bound method or builtin.
//! - [`Stream`]: lazy, single-use result iterator; one per node evaluation.
//! - [`ScopeStack`]: values pushed by `.`, `->`, `-->`, `=>` and `@` for
//!   field lookup, released by guards on every exit path.
//! - [`Bindings`]: `x := ...` and `...#i` names, dynamically scoped.
//! - [`MethodDispatcher`]: prioritized [`MethodResolver`] chain for member
//!   function calls.
//! - [`Session`]: owns the above and a list of tracked queries.

mod bindings;
mod context;
pub mod errors;
mod exec;
pub mod frames;
mod host;
mod ident;
pub mod resolvers;
mod scope;
mod session;
mod value;

#[cfg(test)]
mod test_host;

pub use bindings::Bindings;
pub use context::EvalContext;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use exec::{Scoped, Stream};
pub use frames::Frame;
pub use host::{BlockSymbol, Host, SymbolKind};
pub use resolvers::{
    MethodCaller, MethodDispatcher, MethodFn, MethodRegistry, MethodResolver, RegistryScope,
};
pub use scope::{ScopeGuard, ScopeStack};
pub use session::{Query, Session, SessionBuilder, SessionError, TrackedRender};
pub use value::{Item, Value};

pub use duel_stack::ensure_sufficient_stack;
