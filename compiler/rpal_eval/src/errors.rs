//! Evaluation errors.
//!
//! Operator and built-in rules report an `EvalErrorKind` without knowing
//! where they were invoked; the machine attaches the source line of the
//! control item it was dispatching with [`EvalErrorKind::at`].
//!
//! Every error is fatal. Nothing in the engine recovers from one; each
//! propagates with `?` to `Machine::run`.

use crate::Value;

/// Result of a machine step or a whole run.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Result of an operator or built-in rule, before a line is attached.
pub type OpResult = Result<Value, EvalErrorKind>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("`{operation}` expects {expected}, got {got}")]
    TypeMismatch {
        operation: &'static str,
        expected: &'static str,
        got: String,
    },
    #[error("undeclared identifier \"{name}\"")]
    UndeclaredIdentifier { name: String },
    #[error("function binds {expected} parameters but was given {got} value(s)")]
    ArityMismatch { expected: usize, got: usize },
    #[error("cannot {operation} a non-tuple ({got})")]
    NotATuple {
        operation: &'static str,
        got: &'static str,
    },
    #[error("tuple selection index {index} out of bounds (tuple has {len} elements)")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("don't know how to apply {operator}")]
    UnsupportedOperator { operator: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("maximum recursion depth exceeded ({depth} frames)")]
    RecursionLimit { depth: usize },
    #[error("closure of block {index} applied before its environment was bound")]
    UnboundClosure { index: usize },
    #[error("closure of block {index} was bound twice")]
    ClosureRebound { index: usize },
    #[error("result stack underflow")]
    ResultStackUnderflow,
}

impl EvalErrorKind {
    /// Attach the source line of the triggering control item.
    #[cold]
    pub fn at(self, line: u32) -> EvalError {
        EvalError { kind: self, line }
    }
}

/// A fatal evaluation error with its source line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub line: u32,
}

// Factory functions for the common categories.

#[cold]
pub fn type_mismatch(operation: &'static str, expected: &'static str, got: &Value) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch {
        operation,
        expected,
        got: got.type_name().to_string(),
    }
}

#[cold]
pub fn binary_type_mismatch(
    operation: &'static str,
    expected: &'static str,
    left: &Value,
    right: &Value,
) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch {
        operation,
        expected,
        got: format!("{} and {}", left.type_name(), right.type_name()),
    }
}

#[cold]
pub fn not_a_tuple(operation: &'static str, got: &Value) -> EvalErrorKind {
    EvalErrorKind::NotATuple {
        operation,
        got: got.type_name(),
    }
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalErrorKind {
    EvalErrorKind::IntegerOverflow { operation }
}

#[cold]
pub fn unsupported_operator(operator: &Value) -> EvalErrorKind {
    EvalErrorKind::UnsupportedOperator {
        operator: operator.type_name(),
    }
}
