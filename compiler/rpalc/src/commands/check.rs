//! The `check` command: validate a standardized tree without running it.

use super::{fail, load, read_file, CommandError};

/// Load the program and return the number of control blocks.
pub fn check_source(text: &str) -> Result<usize, CommandError> {
    load(text).map(|program| program.structure.block_count())
}

pub fn check_file(path: &str) {
    let text = read_file(path);
    match check_source(&text) {
        Ok(blocks) => println!("OK: {path} ({blocks} control blocks)"),
        Err(e) => fail(path, &e),
    }
}
