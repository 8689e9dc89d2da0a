//! ui::console
//!
//! The output, error and input streams a command runs against.
//!
//! # Design
//!
//! Handlers never touch `std::io::stdout()` directly. They write to the
//! [`Console`] they are given, which is the process's standard streams in
//! production and in-memory buffers in tests. Terminal detection is part of
//! the console so tests can exercise both the interactive and the piped
//! behaviour of commands like `config:pull`.

use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::sync::{Arc, Mutex};

/// Streams for one command run.
pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
    stdout_tty: bool,
    stdin_tty: bool,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("stdout_tty", &self.stdout_tty)
            .field("stdin_tty", &self.stdin_tty)
            .finish()
    }
}

impl Console {
    /// The process's standard streams.
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            input: Box::new(io::BufReader::new(io::stdin())),
            stdout_tty: io::stdout().is_terminal(),
            stdin_tty: io::stdin().is_terminal(),
        }
    }

    /// In-memory streams fed with `input`; returns the console and its capture.
    pub fn captured(input: &str) -> (Self, Capture) {
        let capture = Capture::default();
        let console = Self {
            out: Box::new(capture.out.clone()),
            err: Box::new(capture.err.clone()),
            input: Box::new(io::Cursor::new(input.as_bytes().to_vec())),
            stdout_tty: false,
            stdin_tty: false,
        };
        (console, capture)
    }

    /// Pretend the streams are (or are not) terminals.
    pub fn with_tty(mut self, stdout_tty: bool, stdin_tty: bool) -> Self {
        self.stdout_tty = stdout_tty;
        self.stdin_tty = stdin_tty;
        self
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    pub fn err(&mut self) -> &mut dyn Write {
        &mut *self.err
    }

    pub fn stdout_is_tty(&self) -> bool {
        self.stdout_tty
    }

    pub fn stdin_is_tty(&self) -> bool {
        self.stdin_tty
    }

    /// Read one line without its trailing newline. End of input yields "".
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Read everything left on the input stream.
    pub fn read_to_string(&mut self) -> io::Result<String> {
        let mut contents = String::new();
        self.input.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Flush both output streams.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

/// A cloneable in-memory writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a captured console wrote.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}

impl Capture {
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_console_records_both_streams() {
        let (mut console, capture) = Console::captured("");
        write!(console.out(), "hello").unwrap();
        write!(console.err(), "oops").unwrap();
        assert_eq!(capture.stdout(), "hello");
        assert_eq!(capture.stderr(), "oops");
    }

    #[test]
    fn read_line_strips_line_endings() {
        let (mut console, _) = Console::captured("first\r\nsecond\n");
        assert_eq!(console.read_line().unwrap(), "first");
        assert_eq!(console.read_line().unwrap(), "second");
        assert_eq!(console.read_line().unwrap(), "");
    }

    #[test]
    fn captured_console_is_not_a_terminal() {
        let (console, _) = Console::captured("");
        assert!(!console.stdout_is_tty());
        let console = console.with_tty(true, false);
        assert!(console.stdout_is_tty());
        assert!(!console.stdin_is_tty());
    }
}
