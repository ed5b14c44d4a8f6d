//! Method resolution for member calls.
//!
//! When an identifier names a member function of a scope value (`s.len()`,
//! `list => size()`), it resolves to a [`MethodCaller`]. Calling it asks
//! the [`MethodDispatcher`] first: a chain of [`MethodResolver`]s, each a
//! source of method implementations keyed by receiver type and method name,
//! tried in priority order until one matches. If none does, the host's
//! own member call is used.
//!
//! # Resolution Order
//!
//! The stock resolver is [`MethodRegistry`], which comes in three scopes
//! checked in this order:
//! 1. `TranslationUnit` registries (priority 0)
//! 2. `Program` registries (priority 1)
//! 3. `Global` registries (priority 2)

mod registry;

pub use registry::{MethodRegistry, RegistryScope};

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::errors::EvalResult;
use crate::host::Host;

/// A method implementation: `(host, receiver, args) -> result`.
pub type MethodFn<H> =
    Rc<dyn Fn(&H, &<H as Host>::Object, &[<H as Host>::Object]) -> EvalResult<<H as Host>::Object>>;

/// A source of method implementations.
pub trait MethodResolver<H: Host> {
    /// Implementation of `method` for receivers of type `type_name`, if
    /// this resolver has one.
    fn resolve(&self, host: &H, type_name: &str, method: &str) -> Option<MethodFn<H>>;

    /// Lower values are consulted first.
    fn priority(&self) -> u8;

    /// Human-readable name for tracing.
    fn name(&self) -> &'static str;
}

/// Resolver chain, sorted by priority. First match wins.
pub struct MethodDispatcher<H: Host> {
    resolvers: Vec<Box<dyn MethodResolver<H>>>,
}

impl<H: Host> Default for MethodDispatcher<H> {
    fn default() -> Self {
        MethodDispatcher {
            resolvers: Vec::new(),
        }
    }
}

impl<H: Host> MethodDispatcher<H> {
    pub fn new(mut resolvers: Vec<Box<dyn MethodResolver<H>>>) -> Self {
        resolvers.sort_by_key(|r| r.priority());
        MethodDispatcher { resolvers }
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolver names in consultation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn resolve(&self, host: &H, type_name: &str, method: &str) -> Option<MethodFn<H>> {
        self.resolvers.iter().find_map(|resolver| {
            let found = resolver.resolve(host, type_name, method);
            if found.is_some() {
                trace!(resolver = resolver.name(), type_name, method, "method resolved");
            }
            found
        })
    }
}

/// A member function bound to its receiver.
///
/// The receiver has references and pointers already stripped.
pub struct MethodCaller<H: Host> {
    pub receiver: H::Object,
    pub method: String,
    pub type_name: String,
}

impl<H: Host> MethodCaller<H> {
    pub fn new(receiver: H::Object, method: impl Into<String>, type_name: String) -> Self {
        MethodCaller {
            receiver,
            method: method.into(),
            type_name,
        }
    }

    /// Call through the dispatcher, or through the host's member call when
    /// no resolver knows the method.
    pub fn invoke(
        &self,
        host: &H,
        dispatcher: &MethodDispatcher<H>,
        args: &[H::Object],
    ) -> EvalResult<H::Object> {
        match dispatcher.resolve(host, &self.type_name, &self.method) {
            Some(method) => method(host, &self.receiver, args),
            None => host.call_member(&self.receiver, &self.method, args),
        }
    }
}

impl<H: Host> Clone for MethodCaller<H> {
    fn clone(&self) -> Self {
        MethodCaller {
            receiver: self.receiver.clone(),
            method: self.method.clone(),
            type_name: self.type_name.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for MethodCaller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodCaller")
            .field("receiver", &self.receiver)
            .field("method", &self.method)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<H: Host> fmt::Display for MethodCaller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<MethodCaller for {}::{}>", self.type_name, self.method)
    }
}
