//! The application rule: what `gamma` does with an operator and operand.

use std::rc::Rc;

use rpal_ir::{Builtin, ControlItem, ControlKind};

use super::{Frame, Machine};
use crate::builtins::{concat, evaluate_pure, translate_escapes};
use crate::errors::{type_mismatch, unsupported_operator};
use crate::{Delta, Eta, EvalErrorKind, Value};

impl Machine<'_> {
    /// Apply `operator` to `operand`. Returns the frame to enter when the
    /// operator is a closure; every other rule completes in place.
    pub(super) fn apply(
        &mut self,
        operator: Value,
        operand: Value,
        frame: &mut Frame,
        line: u32,
    ) -> Result<Option<Frame>, EvalErrorKind> {
        match operator {
            Value::Closure(delta) => return self.call(&delta, operand).map(Some),
            Value::YStar => match operand {
                Value::Closure(delta) => self.results.push(Value::Eta(Eta::new(delta))),
                other => return Err(type_mismatch("Y*", "a function", &other)),
            },
            Value::Eta(eta) => self.unroll(eta, operand, frame, line),
            Value::Tuple(items) => {
                let element = select(&items, &operand)?;
                self.results.push(element);
            }
            Value::Builtin(builtin) => self.apply_builtin(builtin, operand, frame)?,
            Value::PartialConc(first) => {
                let joined = concat(&Value::Str(first), &operand)?;
                self.results.push(joined);
            }
            other => return Err(unsupported_operator(&other)),
        }
        Ok(None)
    }

    /// Enter a closure: bind its parameters in a fresh scope over the
    /// captured environment.
    pub(super) fn call(
        &mut self,
        delta: &Delta,
        operand: Value,
    ) -> Result<Frame, EvalErrorKind> {
        let captured = delta.env().ok_or(EvalErrorKind::UnboundClosure {
            index: delta.index(),
        })?;
        let env = match (delta.params().as_slice(), operand) {
            ([param], operand) => captured.extend([(*param, operand)]),
            (params, Value::Tuple(items)) if items.len() == params.len() => {
                captured.extend(params.iter().copied().zip(items.iter().cloned()))
            }
            (params, Value::Tuple(items)) => {
                return Err(EvalErrorKind::ArityMismatch {
                    expected: params.len(),
                    got: items.len(),
                })
            }
            (params, _) => {
                return Err(EvalErrorKind::ArityMismatch {
                    expected: params.len(),
                    got: 1,
                })
            }
        };
        tracing::debug!(block = delta.index(), depth = self.frames.len(), "apply closure");
        Ok(Frame::enter(delta, env))
    }

    /// One recursion step: apply the wrapped closure to the token itself,
    /// then apply the result to the operand.
    fn unroll(&mut self, eta: Eta, operand: Value, frame: &mut Frame, line: u32) {
        let delta = Rc::clone(eta.delta());
        tracing::debug!(block = delta.index(), "unroll recursion");
        self.results.push(operand);
        self.results.push(Value::Eta(eta));
        self.results.push(Value::Closure(delta));
        frame.control.push(ControlItem::new(ControlKind::Gamma, line));
        frame.control.push(ControlItem::new(ControlKind::Gamma, line));
        if let Some(counters) = &mut self.counters {
            counters.count_unrolling();
        }
    }

    fn apply_builtin(
        &mut self,
        builtin: Builtin,
        operand: Value,
        frame: &mut Frame,
    ) -> Result<(), EvalErrorKind> {
        let result = match builtin {
            Builtin::Print => {
                let text = operand.display(self.interner).to_string();
                self.print_handler.print(&translate_escapes(&text));
                Value::Dummy
            }
            Builtin::Conc => self.conc(operand, frame)?,
            _ => match evaluate_pure(builtin, &operand) {
                Some(result) => result?,
                None => return Err(unsupported_operator(&Value::Builtin(builtin))),
            },
        };
        self.results.push(result);
        Ok(())
    }

    /// `Conc` with its first string. When the next pending item is the
    /// application of this partial result, both applications are fused and
    /// the second operand is taken from the result stack.
    fn conc(&mut self, first: Value, frame: &mut Frame) -> Result<Value, EvalErrorKind> {
        let Value::Str(first) = first else {
            return Err(type_mismatch("Conc", "a string", &first));
        };
        let fuses = frame
            .control
            .last()
            .is_some_and(|item| matches!(item.kind, ControlKind::Gamma));
        if !fuses {
            return Ok(Value::PartialConc(first));
        }
        frame.control.pop();
        let second = self.pop_result()?;
        concat(&Value::Str(first), &second)
    }
}

/// 1-based tuple selection.
fn select(items: &[Value], operand: &Value) -> Result<Value, EvalErrorKind> {
    let Value::Int(index) = *operand else {
        return Err(type_mismatch("tuple selection", "an integer", operand));
    };
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or(EvalErrorKind::IndexOutOfRange {
            index,
            len: items.len(),
        })
}
