#![deny(clippy::arithmetic_side_effects)]
//! RPAL Eval - the control-stack/environment (CSE) machine.
//!
//! Executes the control structures produced by `rpal_ir::build_control`.
//!
//! # Architecture
//!
//! - `Machine`: the control loop. Each closure application pushes a `Frame`
//!   (a control stack plus its environment) instead of recursing on the host
//!   stack; all frames share one result stack.
//! - `Env`: reference-counted lexical scopes linked outward to their parent
//! - `Delta` / `Eta`: closures and recursion tokens
//! - `evaluate_binary` / `evaluate_unary`: operator rules
//! - `PrintHandlerImpl`: where `Print` output goes (stdout, buffer, nowhere)
//!
//! Errors are fatal: the first `EvalError` aborts the run and carries the
//! source line of the control item being dispatched.

mod builtins;
mod closure;
mod diagnostics;
mod environment;
pub mod errors;
mod machine;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use closure::{Delta, Eta};
pub use diagnostics::EvalCounters;
pub use environment::{Env, Scope};
pub use errors::{EvalError, EvalErrorKind, EvalResult, OpResult};
pub use machine::{Machine, MachineBuilder, MachineConfig};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{DisplayValue, Value};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    reason = "Tests use unwrap for brevity"
)]
mod tests;
