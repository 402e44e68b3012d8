//! `MachineBuilder` for creating `Machine` instances.

use std::rc::Rc;

use rpal_ir::{ControlStructure, StringInterner};

use super::Machine;
use crate::{stdout_handler, Delta, Env, EvalCounters, SharedPrintHandler};

/// Resource limits for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Maximum number of live closure frames, the root included. `None`
    /// is unlimited.
    pub max_depth: Option<usize>,
}

/// Builder for a [`Machine`].
///
/// Output goes to stdout unless a print handler is given.
pub struct MachineBuilder<'a> {
    interner: &'a StringInterner,
    structure: &'a ControlStructure,
    print_handler: Option<SharedPrintHandler>,
    config: MachineConfig,
    profile: bool,
}

impl<'a> MachineBuilder<'a> {
    pub fn new(structure: &'a ControlStructure, interner: &'a StringInterner) -> Self {
        Self {
            interner,
            structure,
            print_handler: None,
            config: MachineConfig::default(),
            profile: false,
        }
    }

    /// Set the destination of `Print` output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Limit the frame stack.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    /// Collect `EvalCounters` during runs.
    #[must_use]
    pub fn profile(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    /// Build the machine. The root block is bound to the primitive
    /// environment here, before anything runs.
    pub fn build(self) -> Machine<'a> {
        let root = Delta::bound(Rc::clone(&self.structure.root), Env::primitive());
        Machine {
            interner: self.interner,
            root: Rc::new(root),
            frames: Vec::new(),
            results: Vec::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            config: self.config,
            counters: self.profile.then(EvalCounters::default),
        }
    }
}
