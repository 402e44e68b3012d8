//! Runtime values.
//!
//! Closures and tuples are the only structured values. Tuples are shared
//! `Rc<Vec<Value>>`; `aug` goes through `Rc::make_mut`, so a tuple is only
//! mutated in place when nothing else can observe it.

use std::fmt;
use std::rc::Rc;

use rpal_ir::{Builtin, StringInterner};

use crate::{Delta, Eta};

#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Str(Rc<str>),
    Bool(bool),
    /// Placeholder returned by effectful built-ins.
    Dummy,
    /// Elements in order, selected 1-based. The empty tuple is `nil`.
    Tuple(Rc<Vec<Value>>),
    Closure(Rc<Delta>),
    /// Recursion token produced by applying `Y*` to a closure.
    Eta(Eta),
    /// A reserved identifier that was not shadowed, awaiting application.
    Builtin(Builtin),
    /// The fixed-point primitive.
    YStar,
    /// `Conc` applied to its first string, when the second application was
    /// not the next control item.
    PartialConc(Rc<str>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Rc::new(items))
    }

    pub fn nil() -> Self {
        Value::tuple(Vec::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Bool(_) => "truthvalue",
            Value::Dummy => "dummy",
            Value::Tuple(_) => "tuple",
            Value::Closure(_) => "function",
            Value::Eta(_) => "recursive function",
            Value::Builtin(_) | Value::PartialConc(_) => "built-in function",
            Value::YStar => "Y*",
        }
    }

    /// Anything that can sit in operator position of an application,
    /// tuples excepted.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            Value::Closure(_)
                | Value::Eta(_)
                | Value::Builtin(_)
                | Value::YStar
                | Value::PartialConc(_)
        )
    }

    /// Render the value as `Print` shows it.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> DisplayValue<'a> {
        DisplayValue {
            value: self,
            interner,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) | (Value::PartialConc(a), Value::PartialConc(b)) => {
                a == b
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Dummy, Value::Dummy) | (Value::YStar, Value::YStar) => true,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Eta(a), Value::Eta(b)) => Rc::ptr_eq(a.delta(), b.delta()),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

/// `Display` adapter returned by [`Value::display`].
pub struct DisplayValue<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Dummy => f.write_str("dummy"),
            Value::Tuple(items) if items.is_empty() => f.write_str("nil"),
            Value::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.display(self.interner))?;
                }
                f.write_str(")")
            }
            Value::Closure(delta) => write_closure(f, "lambda", delta, self.interner),
            Value::Eta(eta) => write_closure(f, "eta", eta.delta(), self.interner),
            Value::Builtin(builtin) => f.write_str(builtin.name()),
            Value::YStar => f.write_str("Y*"),
            Value::PartialConc(s) => write!(f, "[Conc '{s}']"),
        }
    }
}

fn write_closure(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    delta: &Delta,
    interner: &StringInterner,
) -> fmt::Result {
    let param = delta
        .params()
        .first()
        .map(|name| interner.lookup(*name).to_string())
        .unwrap_or_default();
    write!(f, "[{kind} closure: {param}: {}]", delta.index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Env;
    use rpal_ir::{ControlBlock, Params};

    fn closure(interner: &StringInterner) -> Rc<Delta> {
        let block = Rc::new(ControlBlock {
            index: 3,
            params: Params::from_slice(&[interner.intern("n")]),
            body: Vec::new(),
        });
        Rc::new(Delta::bound(block, Env::primitive()))
    }

    #[test]
    fn test_display_scalars_and_tuples() {
        let interner = StringInterner::new();
        let value = Value::tuple(vec![
            Value::Int(1),
            Value::string("two"),
            Value::Bool(false),
            Value::nil(),
            Value::Dummy,
        ]);
        assert_eq!(
            value.display(&interner).to_string(),
            "(1, two, false, nil, dummy)"
        );
    }

    #[test]
    fn test_display_closures() {
        let interner = StringInterner::new();
        let delta = closure(&interner);
        assert_eq!(
            Value::Closure(Rc::clone(&delta))
                .display(&interner)
                .to_string(),
            "[lambda closure: n: 3]"
        );
        assert_eq!(
            Value::Eta(Eta::new(delta)).display(&interner).to_string(),
            "[eta closure: n: 3]"
        );
    }

    #[test]
    fn test_closure_equality_is_identity() {
        let interner = StringInterner::new();
        let a = closure(&interner);
        let b = closure(&interner);
        assert_eq!(Value::Closure(Rc::clone(&a)), Value::Closure(Rc::clone(&a)));
        assert_ne!(Value::Closure(a), Value::Closure(b));
    }

    #[test]
    fn test_is_function() {
        assert!(Value::YStar.is_function());
        assert!(Value::Builtin(Builtin::Print).is_function());
        assert!(!Value::nil().is_function());
        assert!(!Value::Int(0).is_function());
    }
}
