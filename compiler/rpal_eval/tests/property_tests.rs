//! Property tests driving generated programs through the whole pipeline.

#![allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    reason = "Tests use unwrap for brevity"
)]

use proptest::prelude::*;
use rpal_eval::{silent_handler, EvalResult, MachineBuilder, Value};
use rpal_ir::{build_control, read_tree, StringInterner};

fn run(text: &str) -> EvalResult {
    let interner = StringInterner::new();
    let tree = read_tree(text, &interner).unwrap();
    let structure = build_control(&tree, &interner).unwrap();
    MachineBuilder::new(&structure, &interner)
        .print_handler(silent_handler())
        .build()
        .run()
}

proptest! {
    #[test]
    fn sum_of_two_literals(a in -1_000_000_000_000i64..1_000_000_000_000, b in -1_000_000_000_000i64..1_000_000_000_000) {
        let program = format!("+\n.<INT:{a}>\n.<INT:{b}>");
        prop_assert_eq!(run(&program).unwrap(), Value::Int(a + b));
    }

    #[test]
    fn tuple_selection_returns_element(items in prop::collection::vec(any::<i32>(), 1..8), pick in any::<prop::sample::Index>()) {
        let index = pick.index(items.len());
        let mut program = String::from("gamma\n.tau\n");
        for item in &items {
            program.push_str(&format!("..<INT:{item}>\n"));
        }
        program.push_str(&format!(".<INT:{}>\n", index + 1));
        prop_assert_eq!(run(&program).unwrap(), Value::Int(i64::from(items[index])));
    }

    #[test]
    fn itos_matches_decimal_text(n in any::<i64>()) {
        let program = format!("gamma\n.<ID:ItoS>\n.<INT:{n}>");
        prop_assert_eq!(run(&program).unwrap(), Value::string(n.to_string()));
    }
}
