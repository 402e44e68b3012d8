//! The `control` command: print the control structures of a program.

use super::{fail, load, read_file, CommandError};

/// Render every control block, one per line.
pub fn control_source(text: &str) -> Result<String, CommandError> {
    let program = load(text)?;
    Ok(program
        .structure
        .display(&program.interner)
        .to_string())
}

pub fn control_file(path: &str) {
    let text = read_file(path);
    match control_source(&text) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => fail(path, &e),
    }
}
