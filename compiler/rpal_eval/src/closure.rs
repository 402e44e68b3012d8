//! Closures and recursion tokens.
//!
//! A `Delta` is created unbound each time the machine evaluates a
//! function-block marker, then bound exactly once to the environment that
//! was active at that moment. The two steps happen back to back; they are
//! separate only so that a second bind can be detected and refused.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use rpal_ir::{ControlBlock, Params};

use crate::Env;

/// A lambda closure: a control block plus the environment it captured.
pub struct Delta {
    block: Rc<ControlBlock>,
    env: OnceCell<Env>,
}

impl Delta {
    /// A closure whose environment has not been bound yet.
    pub fn new(block: Rc<ControlBlock>) -> Self {
        Delta {
            block,
            env: OnceCell::new(),
        }
    }

    /// A closure bound at construction.
    pub fn bound(block: Rc<ControlBlock>, env: Env) -> Self {
        Delta {
            block,
            env: OnceCell::from(env),
        }
    }

    /// Bind the captured environment. Fails if one is already bound; the
    /// rejected environment is handed back.
    pub fn bind(&self, env: Env) -> Result<(), Env> {
        self.env.set(env)
    }

    pub fn env(&self) -> Option<&Env> {
        self.env.get()
    }

    pub fn is_bound(&self) -> bool {
        self.env.get().is_some()
    }

    pub fn block(&self) -> &Rc<ControlBlock> {
        &self.block
    }

    pub fn index(&self) -> usize {
        self.block.index
    }

    pub fn params(&self) -> &Params {
        &self.block.params
    }
}

impl fmt::Debug for Delta {
    // The captured environment can be arbitrarily large; show its depth only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delta")
            .field("index", &self.block.index)
            .field("params", &self.block.params)
            .field("env_depth", &self.env.get().map(Env::depth))
            .finish()
    }
}

/// Recursion token wrapping the closure `Y*` was applied to.
///
/// Applying an `Eta` re-applies the wrapped closure to the `Eta` itself,
/// which is how the recursive name gets bound on every unrolling.
#[derive(Clone, Debug)]
pub struct Eta {
    delta: Rc<Delta>,
}

impl Eta {
    pub fn new(delta: Rc<Delta>) -> Self {
        Eta { delta }
    }

    pub fn delta(&self) -> &Rc<Delta> {
        &self.delta
    }
}
