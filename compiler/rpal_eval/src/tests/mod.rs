//! Evaluator unit tests that don't fit beside a single module.

mod machine_tests;
