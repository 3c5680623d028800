//! Program text parsing
//!
//! An IntCode program is encoded as a single line of comma-separated base-10
//! signed integers. Parsing copies the values into a `Vec<i64>` that a
//! [`crate::vm::Machine`] loads into its tape from address 0.

use crate::vm::errors::VMError;
use std::fs;
use std::path::Path;

/// Parse program text into a tape image.
///
/// Surrounding whitespace (including a trailing newline) is tolerated; empty
/// fields and non-numeric fields are parse errors.
pub fn parse_program(text: &str) -> Result<Vec<i64>, VMError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(VMError::ParseError {
            details: "program text is empty".to_string(),
        });
    }

    trimmed
        .split(',')
        .map(|field| {
            field.trim().parse::<i64>().map_err(|err| VMError::ParseError {
                details: format!("invalid program value '{}': {}", field.trim(), err),
            })
        })
        .collect()
}

/// Read and parse a program file.
pub fn load_program(path: &Path) -> Result<Vec<i64>, VMError> {
    let text = fs::read_to_string(path)?;
    parse_program(&text)
}
