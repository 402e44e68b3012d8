//! Built-in functions applied to a single operand.
//!
//! `Print` and the second half of `Conc` need the machine (output handler,
//! control stack), so they are applied in `machine::apply`; everything here
//! is a pure function of its operand.

use std::rc::Rc;

use rpal_ir::{Builtin, UnaryOp};

use crate::errors::{binary_type_mismatch, integer_overflow, type_mismatch};
use crate::unary_operators::evaluate_unary;
use crate::{OpResult, Value};

/// Apply a pure built-in. Returns `None` for `Print` and `Conc`.
pub fn evaluate_pure(builtin: Builtin, operand: &Value) -> Option<OpResult> {
    let result = match builtin {
        Builtin::Isinteger => Ok(Value::Bool(matches!(operand, Value::Int(_)))),
        Builtin::Isstring => Ok(Value::Bool(matches!(operand, Value::Str(_)))),
        Builtin::Istuple => Ok(Value::Bool(matches!(operand, Value::Tuple(_)))),
        Builtin::Isdummy => Ok(Value::Bool(matches!(operand, Value::Dummy))),
        Builtin::Istruthvalue => Ok(Value::Bool(matches!(operand, Value::Bool(_)))),
        Builtin::Isfunction => Ok(Value::Bool(operand.is_function())),
        Builtin::ItoS => itos(operand),
        Builtin::Order => order(operand),
        Builtin::Null => null(operand),
        Builtin::Stem => stem(operand),
        Builtin::Stern => stern(operand),
        Builtin::Neg => evaluate_unary(operand, UnaryOp::Neg),
        Builtin::Print | Builtin::Conc => return None,
    };
    Some(result)
}

fn itos(operand: &Value) -> OpResult {
    match operand {
        Value::Int(n) => Ok(Value::string(n.to_string())),
        _ => Err(type_mismatch("ItoS", "an integer", operand)),
    }
}

fn order(operand: &Value) -> OpResult {
    match operand {
        Value::Tuple(items) => i64::try_from(items.len())
            .map(Value::Int)
            .map_err(|_| integer_overflow("Order")),
        _ => Err(type_mismatch("Order", "a tuple", operand)),
    }
}

fn null(operand: &Value) -> OpResult {
    match operand {
        Value::Tuple(items) => Ok(Value::Bool(items.is_empty())),
        _ => Err(type_mismatch("Null", "a tuple", operand)),
    }
}

/// First character, or `''` for the empty string.
fn stem(operand: &Value) -> OpResult {
    match operand {
        Value::Str(s) => {
            let end = s.chars().next().map_or(0, char::len_utf8);
            Ok(Value::string(&s[..end]))
        }
        _ => Err(type_mismatch("Stem", "a string", operand)),
    }
}

/// Everything after the first character, or `''` for strings shorter
/// than two characters.
fn stern(operand: &Value) -> OpResult {
    match operand {
        Value::Str(s) => {
            let start = s.chars().next().map_or(0, char::len_utf8);
            Ok(Value::string(&s[start..]))
        }
        _ => Err(type_mismatch("Stern", "a string", operand)),
    }
}

/// Concatenate the two `Conc` operands.
pub fn concat(first: &Value, second: &Value) -> OpResult {
    match (first, second) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len().saturating_add(b.len()));
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(Rc::from(joined)))
        }
        _ => Err(binary_type_mismatch("Conc", "two strings", first, second)),
    }
}

/// Translate the two-character escapes `\t` and `\n` into the control
/// characters they name. Any other backslash is kept as written.
pub fn translate_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') => {
                    out.push('\n');
                    chars.next();
                    continue;
                }
                Some('t') => {
                    out.push('\t');
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
