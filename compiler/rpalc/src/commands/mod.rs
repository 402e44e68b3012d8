//! CLI commands.
//!
//! Each `*_file` function is an entry point used by `main`: it reports
//! failures on stderr and exits with status 1. The `*_source` functions do
//! the work on already-read text and return typed errors, so they can be
//! tested without a process boundary.

mod check;
mod control;
mod run;

pub use check::{check_file, check_source};
pub use control::{control_file, control_source};
pub use run::{parse_run_options, run_file, run_source, RunOptions, RunOutcome};

use rpal_eval::EvalError;
use rpal_ir::{build_control, read_tree, ControlStructure, ReadError, StringInterner, StructureError};

/// Anything that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A standardized tree, lowered and ready to run.
pub struct Program {
    pub interner: StringInterner,
    pub structure: ControlStructure,
}

/// Read a standardized tree dump and build its control structures.
///
/// Refuses trees that still contain sugar.
pub fn load(text: &str) -> Result<Program, CommandError> {
    let interner = StringInterner::new();
    let tree = read_tree(text, &interner)?;
    let structure = build_control(&tree, &interner)?;
    tracing::debug!(blocks = structure.block_count(), "program loaded");
    Ok(Program {
        interner,
        structure,
    })
}

/// Read a file to a string or exit with status 1.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Print a command error and exit with status 1.
pub(crate) fn fail(path: &str, error: &CommandError) -> ! {
    eprintln!("error in '{path}': {error}");
    std::process::exit(1);
}
