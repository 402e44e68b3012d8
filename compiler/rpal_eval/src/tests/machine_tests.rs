//! Tests for the control loop and the application rule.

use crate::errors::EvalErrorKind;
use crate::{buffer_handler, EvalCounters, EvalResult, MachineBuilder, Value};
use pretty_assertions::assert_eq;
use rpal_ir::{build_control, read_tree, StringInterner};

struct Outcome {
    result: EvalResult,
    output: String,
    counters: EvalCounters,
}

fn eval_with(text: &str, max_depth: Option<usize>) -> Outcome {
    let interner = StringInterner::new();
    let tree = read_tree(text, &interner).unwrap();
    let structure = build_control(&tree, &interner).unwrap();
    let handler = buffer_handler();
    let mut builder = MachineBuilder::new(&structure, &interner)
        .print_handler(handler.clone())
        .profile(true);
    if let Some(depth) = max_depth {
        builder = builder.max_depth(depth);
    }
    let mut machine = builder.build();
    let result = machine.run();
    Outcome {
        result,
        output: handler.get_output(),
        counters: machine.counters().cloned().unwrap_or_default(),
    }
}

fn eval(text: &str) -> Outcome {
    eval_with(text, None)
}

fn error(text: &str) -> (EvalErrorKind, u32) {
    let err = eval(text).result.unwrap_err();
    (err.kind, err.line)
}

/// `rec f n = n eq 0 -> 1 | n * f (n - 1)` applied to `arg`.
fn factorial(arg: i64) -> String {
    format!(
        "gamma\n\
         .lambda\n\
         ..<ID:f>\n\
         ..gamma\n\
         ...<ID:f>\n\
         ...<INT:{arg}>\n\
         .gamma\n\
         ..<Y*>\n\
         ..lambda\n\
         ...<ID:f>\n\
         ...lambda\n\
         ....<ID:n>\n\
         ....->\n\
         .....eq\n\
         ......<ID:n>\n\
         ......<INT:0>\n\
         .....<INT:1>\n\
         .....*\n\
         ......<ID:n>\n\
         ......gamma\n\
         .......<ID:f>\n\
         .......-\n\
         ........<ID:n>\n\
         ........<INT:1>\n"
    )
}

/// `rec s n = n eq 0 -> 0 | n + s (n - 1)` applied to `arg`.
fn sum_to(arg: i64) -> String {
    factorial(arg)
        .replace(".....<INT:1>\n.....*", ".....<INT:0>\n.....+")
}

#[test]
fn test_arithmetic_precedence_already_resolved() {
    let outcome = eval("+\n.<INT:2>\n.*\n..<INT:3>\n..<INT:4>");
    assert_eq!(outcome.result.unwrap(), Value::Int(14));
}

#[test]
fn test_operand_order() {
    // 10 - 3: the left operand is popped first.
    assert_eq!(eval("-\n.<INT:10>\n.<INT:3>").result.unwrap(), Value::Int(7));
    assert_eq!(eval("ls\n.<INT:1>\n.<INT:2>").result.unwrap(), Value::Bool(true));
}

#[test]
fn test_tuple_construction_keeps_order() {
    let outcome = eval("tau\n.<INT:1>\n.<STR:'two'>\n.<nil>");
    assert_eq!(
        outcome.result.unwrap(),
        Value::tuple(vec![Value::Int(1), Value::string("two"), Value::nil()])
    );
}

#[test]
fn test_tuple_selection() {
    let program = |index: i64| format!("gamma\n.tau\n..<INT:10>\n..<INT:20>\n..<INT:30>\n.<INT:{index}>");
    assert_eq!(eval(&program(2)).result.unwrap(), Value::Int(20));
    assert_eq!(
        error(&program(0)),
        (EvalErrorKind::IndexOutOfRange { index: 0, len: 3 }, 1)
    );
    assert_eq!(
        error(&program(4)),
        (EvalErrorKind::IndexOutOfRange { index: 4, len: 3 }, 1)
    );
}

#[test]
fn test_beta_takes_one_branch() {
    let outcome = eval("->\n.<true>\n.<INT:1>\n.gamma\n..<ID:Print>\n..<STR:'no'>");
    assert_eq!(outcome.result.unwrap(), Value::Int(1));
    assert_eq!(outcome.output, "");
    assert_eq!(outcome.counters.branches_taken, 1);

    let outcome = eval("->\n.<false>\n.<INT:1>\n.gamma\n..<ID:Print>\n..<STR:'yes'>");
    assert_eq!(outcome.result.unwrap(), Value::Dummy);
    assert_eq!(outcome.output, "yes");
}

#[test]
fn test_beta_requires_truthvalue() {
    let (kind, line) = error("->\n.<INT:1>\n.<INT:2>\n.<INT:3>");
    assert_eq!(
        kind,
        EvalErrorKind::TypeMismatch {
            operation: "conditional",
            expected: "a truthvalue",
            got: "integer".to_string(),
        }
    );
    assert_eq!(line, 1);
}

#[test]
fn test_conc_fuses_both_applications() {
    let outcome = eval("gamma\n.gamma\n..<ID:Conc>\n..<STR:'ab'>\n.<STR:'cd'>");
    assert_eq!(outcome.result.unwrap(), Value::string("abcd"));
    assert_eq!(outcome.counters.applications, 0);
}

#[test]
fn test_conc_partial_application() {
    // (lambda c. c 'b') (Conc 'a')
    let outcome = eval(
        "gamma\n.lambda\n..<ID:c>\n..gamma\n...<ID:c>\n...<STR:'b'>\n.gamma\n..<ID:conc>\n..<STR:'a'>",
    );
    assert_eq!(outcome.result.unwrap(), Value::string("ab"));
}

#[test]
fn test_conc_requires_strings() {
    let (kind, _) = error("gamma\n.gamma\n..<ID:Conc>\n..<STR:'ab'>\n.<INT:1>");
    assert!(matches!(kind, EvalErrorKind::TypeMismatch { operation: "Conc", .. }));
}

#[test]
fn test_print_translates_escapes() {
    let outcome = eval("gamma\n.<ID:Print>\n.<STR:'a\\tb\\n'>");
    assert_eq!(outcome.result.unwrap(), Value::Dummy);
    assert_eq!(outcome.output, "a\tb\n");
}

#[test]
fn test_print_tuple() {
    let outcome = eval("gamma\n.<ID:print>\n.tau\n..<INT:1>\n..<STR:'x'>\n..<nil>\n..<true>");
    assert_eq!(outcome.output, "(1, x, nil, true)");
}

#[test]
fn test_itos_round_trip_through_conc() {
    // ItoS 42 eq Conc '4' '2'
    let outcome = eval(
        "eq\n.gamma\n..<ID:ItoS>\n..<INT:42>\n.gamma\n..gamma\n...<ID:Conc>\n...<STR:'4'>\n..<STR:'2'>",
    );
    assert_eq!(outcome.result.unwrap(), Value::Bool(true));
}

#[test]
fn test_closure_application_binds_parameter() {
    let outcome = eval("gamma\n.lambda\n..<ID:x>\n..+\n...<ID:x>\n...<INT:1>\n.<INT:41>");
    assert_eq!(outcome.result.unwrap(), Value::Int(42));
    assert_eq!(outcome.counters.applications, 1);
}

#[test]
fn test_multiple_parameters_bind_tuple_elements() {
    let program = |arg: &str| {
        format!("gamma\n.lambda\n..,\n...<ID:x>\n...<ID:y>\n..-\n...<ID:x>\n...<ID:y>\n{arg}")
    };
    assert_eq!(
        eval(&program(".tau\n..<INT:5>\n..<INT:3>")).result.unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        error(&program(".<INT:1>")),
        (EvalErrorKind::ArityMismatch { expected: 2, got: 1 }, 1)
    );
    assert_eq!(
        error(&program(".tau\n..<INT:5>\n..<INT:3>\n..<INT:1>")),
        (EvalErrorKind::ArityMismatch { expected: 2, got: 3 }, 1)
    );
}

#[test]
fn test_empty_parameter_list() {
    // (lambda (). 7) nil
    let outcome = eval("gamma\n.lambda\n..<()>\n..<INT:7>\n.<nil>");
    assert_eq!(outcome.result.unwrap(), Value::Int(7));
}

#[test]
fn test_undeclared_identifier_reports_line() {
    let (kind, line) = error("+\n.<INT:1>\n.<ID:y>");
    assert_eq!(
        kind,
        EvalErrorKind::UndeclaredIdentifier {
            name: "y".to_string()
        }
    );
    assert_eq!(line, 3);
}

#[test]
fn test_bound_name_shadows_builtin() {
    // (lambda Print. Print + 1) 2
    let outcome = eval("gamma\n.lambda\n..<ID:Print>\n..+\n...<ID:Print>\n...<INT:1>\n.<INT:2>");
    assert_eq!(outcome.result.unwrap(), Value::Int(3));
    assert_eq!(outcome.output, "");
}

#[test]
fn test_closures_capture_their_environment() {
    // let add n = lambda x. x + n in (add 1 10, add 2 10)
    let outcome = eval(
        "gamma\n\
         .lambda\n\
         ..<ID:add>\n\
         ..tau\n\
         ...gamma\n\
         ....gamma\n\
         .....<ID:add>\n\
         .....<INT:1>\n\
         ....<INT:10>\n\
         ...gamma\n\
         ....gamma\n\
         .....<ID:add>\n\
         .....<INT:2>\n\
         ....<INT:10>\n\
         .lambda\n\
         ..<ID:n>\n\
         ..lambda\n\
         ...<ID:x>\n\
         ...+\n\
         ....<ID:x>\n\
         ....<ID:n>",
    );
    assert_eq!(
        outcome.result.unwrap(),
        Value::tuple(vec![Value::Int(11), Value::Int(12)])
    );
}

#[test]
fn test_factorial() {
    let outcome = eval(&factorial(5));
    assert_eq!(outcome.result.unwrap(), Value::Int(120));
    assert_eq!(outcome.counters.recursion_unrollings, 6);
    assert_eq!(outcome.counters.branches_taken, 6);
}

#[test]
fn test_recursion_base_case_unrolls_once() {
    let outcome = eval(&factorial(0));
    assert_eq!(outcome.result.unwrap(), Value::Int(1));
    assert_eq!(outcome.counters.recursion_unrollings, 1);
    assert_eq!(outcome.counters.branches_taken, 1);
}

#[test]
fn test_deep_recursion_uses_no_host_stack() {
    let outcome = eval(&sum_to(100_000));
    assert_eq!(outcome.result.unwrap(), Value::Int(5_000_050_000));
    assert!(outcome.counters.max_frame_depth >= 100_000);
}

#[test]
fn test_recursion_limit() {
    let outcome = eval_with(&factorial(50), Some(16));
    let err = outcome.result.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 16 });
}

#[test]
fn test_tail_application_does_not_grow_frames() {
    // rec loop n = n eq 0 -> 'done' | loop (n - 1)
    let program = "gamma\n\
         .lambda\n\
         ..<ID:loop>\n\
         ..gamma\n\
         ...<ID:loop>\n\
         ...<INT:10000>\n\
         .gamma\n\
         ..<Y*>\n\
         ..lambda\n\
         ...<ID:loop>\n\
         ...lambda\n\
         ....<ID:n>\n\
         ....->\n\
         .....eq\n\
         ......<ID:n>\n\
         ......<INT:0>\n\
         .....<STR:'done'>\n\
         .....gamma\n\
         ......<ID:loop>\n\
         ......-\n\
         .......<ID:n>\n\
         .......<INT:1>";
    let outcome = eval_with(program, Some(8));
    assert_eq!(outcome.result.unwrap(), Value::string("done"));
    assert!(outcome.counters.max_frame_depth <= 3);
}

#[test]
fn test_ystar_requires_closure() {
    let (kind, _) = error("gamma\n.<Y*>\n.<INT:1>");
    assert!(matches!(kind, EvalErrorKind::TypeMismatch { operation: "Y*", .. }));
}

#[test]
fn test_applying_a_scalar_is_unsupported() {
    assert_eq!(
        error("gamma\n.<INT:1>\n.<INT:2>"),
        (
            EvalErrorKind::UnsupportedOperator {
                operator: "integer"
            },
            1
        )
    );
}

#[test]
fn test_aug_in_program() {
    // (nil aug 1) aug 2
    let outcome = eval("aug\n.aug\n..<nil>\n..<INT:1>\n.<INT:2>");
    assert_eq!(
        outcome.result.unwrap(),
        Value::tuple(vec![Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn test_run_is_repeatable() {
    let interner = StringInterner::new();
    let tree = read_tree("gamma\n.<ID:Print>\n.<STR:'x'>", &interner).unwrap();
    let structure = build_control(&tree, &interner).unwrap();
    let handler = buffer_handler();
    let mut machine = MachineBuilder::new(&structure, &interner)
        .print_handler(handler.clone())
        .build();
    machine.run().unwrap();
    machine.run().unwrap();
    assert_eq!(handler.get_output(), "xx");
    assert!(machine.counters().is_none());
}
