//! Output sinks for interpreter output.

use std::{
    borrow::Cow,
    io::{self, Write as _},
};

use crate::exception_public::{ErrorKind, Exception};

/// Trait for handling output from the `print()` and `assert()` builtins.
///
/// Implement this trait to capture or redirect output from Step code. The
/// default implementation [`StdPrint`] writes to stdout.
pub trait PrintWriter {
    /// Called once for each formatted value.
    ///
    /// This method is responsible for writing only the given value's text;
    /// separators (spaces) and the final terminator (a newline) are
    /// emitted via [`PrintWriter::stdout_push`].
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception>;

    /// Adds a single character to the output stream.
    ///
    /// Generally called to add spaces and newlines within print output.
    fn stdout_push(&mut self, end: char) -> Result<(), Exception>;
}

/// Default `PrintWriter` that writes to the process stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

fn stdout_error(err: &io::Error) -> Exception {
    Exception::new(ErrorKind::Runtime, format!("stdout write failed: {err}"), None)
}

impl PrintWriter for StdPrint {
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception> {
        io::stdout()
            .write_all(output.as_bytes())
            .map_err(|e| stdout_error(&e))
    }

    fn stdout_push(&mut self, end: char) -> Result<(), Exception> {
        let mut buf = [0u8; 4];
        io::stdout()
            .write_all(end.encode_utf8(&mut buf).as_bytes())
            .map_err(|e| stdout_error(&e))
    }
}

/// A `PrintWriter` that collects all output into a string.
///
/// Useful for testing or capturing print output programmatically.
#[derive(Debug, Default)]
pub struct CollectStringPrint(String);

impl CollectStringPrint {
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Returns the collected output as a string slice.
    #[must_use]
    pub fn output(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the writer and returns the collected output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.0
    }
}

impl PrintWriter for CollectStringPrint {
    fn stdout_write(&mut self, output: Cow<'_, str>) -> Result<(), Exception> {
        self.0.push_str(&output);
        Ok(())
    }

    fn stdout_push(&mut self, end: char) -> Result<(), Exception> {
        self.0.push(end);
        Ok(())
    }
}

/// `PrintWriter` that ignores all output.
///
/// Useful for suppressing print output during benchmarking.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn stdout_write(&mut self, _output: Cow<'_, str>) -> Result<(), Exception> {
        Ok(())
    }

    fn stdout_push(&mut self, _end: char) -> Result<(), Exception> {
        Ok(())
    }
}
