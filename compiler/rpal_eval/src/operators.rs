//! Binary operator implementations.
//!
//! The operand kinds are a closed set, so dispatch is a direct match on the
//! pair of values. `left` is the operand popped first from the result stack,
//! which is the left operand of the source expression.

use std::rc::Rc;

use rpal_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, integer_overflow, not_a_tuple};
use crate::{EvalErrorKind, OpResult, Value};

/// Checked arithmetic where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> OpResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation on two reduced values.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> OpResult {
    if op == BinaryOp::Aug {
        return eval_aug(left, right);
    }
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        _ => Err(binary_type_mismatch(
            op.label(),
            expected_operands(op),
            &left,
            &right,
        )),
    }
}

fn expected_operands(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow => {
            "two integers"
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            "two integers or two strings"
        }
        BinaryOp::Eq | BinaryOp::Ne => "two values of the same scalar kind",
        BinaryOp::Or | BinaryOp::And => "two truthvalues",
        BinaryOp::Aug => "a tuple",
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        // Truncates toward zero.
        BinaryOp::Div => {
            if b == 0 {
                Err(EvalErrorKind::DivisionByZero)
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Pow => int_pow(a, b),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Le => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Ge => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::Ne => Ok(Value::Bool(a != b)),
        BinaryOp::Or | BinaryOp::And | BinaryOp::Aug => Err(binary_type_mismatch(
            op.label(),
            expected_operands(op),
            &Value::Int(a),
            &Value::Int(b),
        )),
    }
}

/// Exact integer power.
///
/// A negative exponent gives the truncated reciprocal: `0` unless the base
/// is `1` or `-1`. `0` to a negative power is a division by zero.
fn int_pow(base: i64, exp: i64) -> OpResult {
    if exp < 0 {
        return match base {
            0 => Err(EvalErrorKind::DivisionByZero),
            1 => Ok(Value::Int(1)),
            -1 => Ok(Value::Int(if exp & 1 == 0 { 1 } else { -1 })),
            _ => Ok(Value::Int(0)),
        };
    }
    match u32::try_from(exp) {
        Ok(exp) => checked_arith(base.checked_pow(exp), "exponentiation"),
        // Only 0, 1 and -1 survive an exponent this large.
        Err(_) => match base {
            0 | 1 => Ok(Value::Int(base)),
            -1 => Ok(Value::Int(if exp & 1 == 0 { 1 } else { -1 })),
            _ => Err(integer_overflow("exponentiation")),
        },
    }
}

fn eval_string_binary(a: &Rc<str>, b: &Rc<str>, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::Le => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::Ge => Ok(Value::Bool(a >= b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::Ne => Ok(Value::Bool(a != b)),
        _ => Err(binary_type_mismatch(
            op.label(),
            expected_operands(op),
            &Value::Str(Rc::clone(a)),
            &Value::Str(Rc::clone(b)),
        )),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> OpResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::Ne => Ok(Value::Bool(a != b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        BinaryOp::And => Ok(Value::Bool(a && b)),
        _ => Err(binary_type_mismatch(
            op.label(),
            expected_operands(op),
            &Value::Bool(a),
            &Value::Bool(b),
        )),
    }
}

/// Append `right` as the new last element of the tuple `left`.
///
/// The tuple is copied only when another value still shares it, so earlier
/// holders of the tuple never observe the new element.
fn eval_aug(left: Value, right: Value) -> OpResult {
    match left {
        Value::Tuple(mut items) => {
            Rc::make_mut(&mut items).push(right);
            Ok(Value::Tuple(items))
        }
        other => Err(not_a_tuple("aug", &other)),
    }
}
