//! Lexical environments.
//!
//! An environment is a chain of immutable scopes. Applying a closure
//! creates one new scope holding the parameter bindings, whose parent is
//! the closure's captured environment. Nothing is ever rebound in place,
//! so scopes are shared freely between closures and frames.

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

use rpal_ir::Name;

use crate::Value;

/// A single scope of bindings.
pub struct Scope {
    /// Parameter bindings (`FxHashMap` for faster hashing with `Name` keys).
    bindings: FxHashMap<Name, Value>,
    parent: Option<Env>,
}

impl Scope {
    /// Create an empty scope with no parent.
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    /// Create an empty scope extending `parent`.
    pub fn with_parent(parent: Env) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind a name in this scope. Only valid before the scope is frozen
    /// into an [`Env`].
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Look up a name in this scope only.
    #[inline]
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// Long parent chains are released iteratively.
impl Drop for Scope {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(Env(rc)) = next {
            match Rc::try_unwrap(rc) {
                Ok(mut scope) => next = scope.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to a frozen scope chain.
#[repr(transparent)]
#[derive(Clone)]
pub struct Env(Rc<Scope>);

impl Env {
    /// The primitive environment: empty and parentless. Reserved
    /// identifiers are resolved by the machine when lookup falls through.
    pub fn primitive() -> Self {
        Env::from(Scope::new())
    }

    /// Extend this environment with a scope of fresh bindings.
    pub fn extend(&self, bindings: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let mut scope = Scope::with_parent(self.clone());
        for (name, value) in bindings {
            scope.define(name, value);
        }
        Env::from(scope)
    }

    /// Find the nearest binding of `name`, walking outward.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut scope = &*self.0;
        loop {
            if let Some(value) = scope.get(name) {
                return Some(value.clone());
            }
            scope = &scope.parent.as_ref()?.0;
        }
    }

    pub fn parent(&self) -> Option<&Env> {
        self.0.parent.as_ref()
    }

    /// Number of scopes in the chain, this one included.
    pub fn depth(&self) -> usize {
        let mut depth: usize = 1;
        let mut env = self;
        while let Some(parent) = env.parent() {
            depth = depth.saturating_add(1);
            env = parent;
        }
        depth
    }

    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Scope> for Env {
    fn from(scope: Scope) -> Self {
        Env(Rc::new(scope))
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("bindings", &self.0.len())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests;
