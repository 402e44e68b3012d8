//! Unary operator implementations.

use rpal_ir::UnaryOp;

use crate::errors::{integer_overflow, type_mismatch};
use crate::{OpResult, Value};

/// Evaluate a unary operation using direct pattern matching.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> OpResult {
    match (value, op) {
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        (Value::Int(n), UnaryOp::Neg) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (_, UnaryOp::Not) => Err(type_mismatch("not", "a truthvalue", value)),
        (_, UnaryOp::Neg) => Err(type_mismatch("neg", "an integer", value)),
    }
}
