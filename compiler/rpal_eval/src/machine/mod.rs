//! The CSE machine control loop.
//!
//! The machine keeps an explicit stack of frames. A frame is the control
//! stack of one closure activation together with the environment its items
//! resolve names in. Applying a closure pushes a new frame instead of
//! recursing on the host stack, so program recursion depth is limited only
//! by memory (or by `MachineConfig::max_depth`).
//!
//! A frame whose control stack is exhausted is dropped before its callee is
//! pushed, so an application in tail position does not grow the stack.

mod apply;
mod builder;

pub use builder::{MachineBuilder, MachineConfig};

use std::rc::Rc;

use rpal_ir::{ControlItem, ControlKind, StringInterner};

use crate::errors::type_mismatch;
use crate::{
    evaluate_binary, evaluate_unary, Delta, Env, EvalCounters, EvalErrorKind, EvalResult,
    SharedPrintHandler, Value,
};

/// One closure activation.
struct Frame {
    /// Pending items; the next one is at the end.
    control: Vec<ControlItem>,
    env: Env,
}

impl Frame {
    fn enter(delta: &Delta, env: Env) -> Self {
        Frame {
            control: delta.block().body.clone(),
            env,
        }
    }
}

/// A configured CSE machine for one program.
pub struct Machine<'a> {
    interner: &'a StringInterner,
    /// The program's root block, bound to the primitive environment.
    root: Rc<Delta>,
    frames: Vec<Frame>,
    /// Shared by every frame.
    results: Vec<Value>,
    print_handler: SharedPrintHandler,
    config: MachineConfig,
    counters: Option<EvalCounters>,
}

impl<'a> Machine<'a> {
    /// Evaluate the program to completion.
    ///
    /// Returns the value left on the result stack, or `dummy` for a program
    /// that leaves none. The first error aborts the run.
    #[tracing::instrument(level = "debug", skip_all, fields(root = self.root.index()))]
    pub fn run(&mut self) -> EvalResult {
        self.frames.clear();
        self.results.clear();
        if let Some(counters) = &mut self.counters {
            *counters = EvalCounters::default();
        }

        let env = self
            .root
            .env()
            .cloned()
            .ok_or(EvalErrorKind::UnboundClosure {
                index: self.root.index(),
            })
            .map_err(|kind| kind.at(0))?;
        self.frames.push(Frame::enter(&self.root, env));

        while let Some(mut frame) = self.frames.pop() {
            let Some(item) = frame.control.pop() else {
                continue;
            };
            let line = item.line;
            tracing::trace!(line, item = describe(&item.kind), "dispatch");
            if let Some(counters) = &mut self.counters {
                counters.count_item();
            }

            let callee = self.dispatch(item, &mut frame).map_err(|kind| kind.at(line))?;

            if !frame.control.is_empty() {
                self.frames.push(frame);
            }
            if let Some(callee) = callee {
                self.push_frame(callee).map_err(|kind| kind.at(line))?;
            }
        }

        tracing::debug!(remaining = self.results.len(), "program finished");
        Ok(self.results.pop().unwrap_or(Value::Dummy))
    }

    fn push_frame(&mut self, frame: Frame) -> Result<(), EvalErrorKind> {
        if let Some(max) = self.config.max_depth {
            if self.frames.len() >= max {
                return Err(EvalErrorKind::RecursionLimit { depth: max });
            }
        }
        self.frames.push(frame);
        let depth = self.frames.len();
        if let Some(counters) = &mut self.counters {
            counters.count_application();
            counters.observe_depth(depth);
        }
        Ok(())
    }

    /// Dispatch one control item. Returns a frame to enter when the item
    /// applied a closure.
    fn dispatch(
        &mut self,
        item: ControlItem,
        frame: &mut Frame,
    ) -> Result<Option<Frame>, EvalErrorKind> {
        match item.kind {
            ControlKind::Binary(op) => {
                let left = self.pop_result()?;
                let right = self.pop_result()?;
                self.results.push(evaluate_binary(left, right, op)?);
            }
            ControlKind::Unary(op) => {
                let operand = self.pop_result()?;
                self.results.push(evaluate_unary(&operand, op)?);
            }
            ControlKind::Identifier { name, builtin } => {
                let value = match (frame.env.lookup(name), builtin) {
                    (Some(value), _) => value,
                    (None, Some(builtin)) => Value::Builtin(builtin),
                    (None, None) => {
                        return Err(EvalErrorKind::UndeclaredIdentifier {
                            name: self.interner.lookup(name).to_string(),
                        })
                    }
                };
                self.results.push(value);
            }
            ControlKind::Int(n) => self.results.push(Value::Int(n)),
            ControlKind::Str(s) => self.results.push(Value::Str(s)),
            ControlKind::Bool(b) => self.results.push(Value::Bool(b)),
            ControlKind::Dummy => self.results.push(Value::Dummy),
            ControlKind::YStar => self.results.push(Value::YStar),
            ControlKind::Tau(arity) => {
                let tuple = self.build_tuple(arity)?;
                self.results.push(tuple);
            }
            ControlKind::Beta(beta) => {
                let branch = match self.pop_result()? {
                    Value::Bool(true) => &beta.then,
                    Value::Bool(false) => &beta.otherwise,
                    other => return Err(type_mismatch("conditional", "a truthvalue", &other)),
                };
                frame.control.extend(branch.iter().cloned());
                if let Some(counters) = &mut self.counters {
                    counters.count_branch();
                }
            }
            ControlKind::Delta(block) => {
                let delta = Delta::new(block);
                bind_closure(&delta, frame.env.clone())?;
                self.results.push(Value::Closure(Rc::new(delta)));
            }
            ControlKind::Gamma => {
                let operator = self.pop_result()?;
                let operand = self.pop_result()?;
                return self.apply(operator, operand, frame, item.line);
            }
        }
        Ok(None)
    }

    /// Pop `arity` results into a tuple. The first popped is the first
    /// element.
    fn build_tuple(&mut self, arity: usize) -> Result<Value, EvalErrorKind> {
        let start = self
            .results
            .len()
            .checked_sub(arity)
            .ok_or(EvalErrorKind::ResultStackUnderflow)?;
        let mut items = self.results.split_off(start);
        items.reverse();
        Ok(Value::tuple(items))
    }

    fn pop_result(&mut self) -> Result<Value, EvalErrorKind> {
        self.results
            .pop()
            .ok_or(EvalErrorKind::ResultStackUnderflow)
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Counters of the last run, when profiling is enabled.
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.counters.as_ref()
    }
}

/// Capture `env` as the closure's environment.
fn bind_closure(delta: &Delta, env: Env) -> Result<(), EvalErrorKind> {
    delta
        .bind(env)
        .map_err(|_| EvalErrorKind::ClosureRebound {
            index: delta.index(),
        })
}

/// Short name of a control item for trace output.
fn describe(kind: &ControlKind) -> &'static str {
    match kind {
        ControlKind::Binary(op) => op.label(),
        ControlKind::Unary(op) => op.label(),
        ControlKind::Identifier { .. } => "identifier",
        ControlKind::Int(_) => "integer",
        ControlKind::Str(_) => "string",
        ControlKind::Bool(_) => "truthvalue",
        ControlKind::Dummy => "dummy",
        ControlKind::YStar => "Y*",
        ControlKind::Tau(_) => "tau",
        ControlKind::Beta(_) => "beta",
        ControlKind::Delta(_) => "delta",
        ControlKind::Gamma => "gamma",
    }
}
