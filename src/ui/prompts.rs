//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts read from the console's input stream, so piped input answers them
//! the same way a person at a terminal would. Password prompts suppress echo
//! only when standard input is a terminal.

use std::io::Write;

use thiserror::Error;

use super::console::Console;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// Prompt for a line of text.
pub fn input(console: &mut Console, message: &str) -> Result<String, PromptError> {
    write!(console.out(), "{}", message)?;
    console.out().flush()?;
    Ok(console.read_line()?.trim().to_string())
}

/// Prompt for yes/no. Anything but `y`/`Y` is a no.
pub fn confirm(console: &mut Console, message: &str) -> Result<bool, PromptError> {
    let answer = input(console, message)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Prompt for masked input.
pub fn password(console: &mut Console, message: &str) -> Result<String, PromptError> {
    if console.stdin_is_tty() {
        console.out().flush()?;
        return Ok(rpassword::prompt_password(message)?);
    }

    write!(console.out(), "{}", message)?;
    console.out().flush()?;
    let value = console.read_line()?;
    writeln!(console.out())?;
    Ok(value)
}
