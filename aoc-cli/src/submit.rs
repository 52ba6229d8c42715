//! Answer submission

use crate::error::CliError;
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// Read the answer from the argument, the file, or piped stdin, in that order
///
/// Only the first line counts, trimmed. `stdin` is `None` when it is an
/// interactive terminal.
pub fn read_answer(
    argument: Option<&str>,
    file: Option<&Path>,
    stdin: Option<&mut dyn BufRead>,
) -> Result<String, CliError> {
    let raw = if let Some(answer) = argument {
        answer.to_string()
    } else if let Some(path) = file {
        fs::read_to_string(path)?
    } else if let Some(stdin) = stdin {
        let mut line = String::new();
        stdin.read_line(&mut line)?;
        line
    } else {
        return Err(CliError::MissingAnswer);
    };

    let answer = raw.lines().next().unwrap_or_default().trim();
    if answer.is_empty() {
        return Err(CliError::MissingAnswer);
    }
    Ok(answer.to_string())
}
