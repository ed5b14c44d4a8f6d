//! Table-driven method resolver.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{MethodFn, MethodResolver};
use crate::errors::EvalResult;
use crate::host::Host;

/// Where a registry's methods come from. Narrower scopes win.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum RegistryScope {
    TranslationUnit,
    Program,
    Global,
}

impl RegistryScope {
    pub const fn priority(self) -> u8 {
        match self {
            Self::TranslationUnit => 0,
            Self::Program => 1,
            Self::Global => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::TranslationUnit => "translation-unit registry",
            Self::Program => "program registry",
            Self::Global => "global registry",
        }
    }
}

/// Methods keyed by `(receiver type, method name)`.
///
/// A disabled registry resolves nothing.
pub struct MethodRegistry<H: Host> {
    scope: RegistryScope,
    enabled: bool,
    methods: FxHashMap<(String, String), MethodFn<H>>,
}

impl<H: Host> MethodRegistry<H> {
    pub fn new(scope: RegistryScope) -> Self {
        MethodRegistry {
            scope,
            enabled: true,
            methods: FxHashMap::default(),
        }
    }

    pub fn scope(&self) -> RegistryScope {
        self.scope
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Register `method` for receivers of `type_name`.
    pub fn register<F>(&mut self, type_name: &str, method: &str, f: F)
    where
        F: Fn(&H, &H::Object, &[H::Object]) -> EvalResult<H::Object> + 'static,
    {
        self.methods
            .insert((type_name.to_string(), method.to_string()), Rc::new(f));
    }

    /// Builder form of [`MethodRegistry::register`].
    #[must_use]
    pub fn with<F>(mut self, type_name: &str, method: &str, f: F) -> Self
    where
        F: Fn(&H, &H::Object, &[H::Object]) -> EvalResult<H::Object> + 'static,
    {
        self.register(type_name, method, f);
        self
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<H: Host> MethodResolver<H> for MethodRegistry<H> {
    fn resolve(&self, _host: &H, type_name: &str, method: &str) -> Option<MethodFn<H>> {
        if !self.enabled {
            return None;
        }
        self.methods
            .get(&(type_name.to_string(), method.to_string()))
            .cloned()
    }

    fn priority(&self) -> u8 {
        self.scope.priority()
    }

    fn name(&self) -> &'static str {
        self.scope.name()
    }
}
