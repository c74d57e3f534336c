//! Public error types surfaced by the interpreter.

use std::fmt;

use strum::Display;

/// Classification of a fatal interpreter error.
///
/// All three kinds stop the program; no error is catchable from Step code.
/// The `Display` strings match the diagnostic prefixes the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The source text could not be tokenized.
    #[strum(serialize = "LexError")]
    Lex,
    /// The token stream did not match the grammar.
    #[strum(serialize = "ParseError")]
    Parse,
    /// Execution failed: unbound name, wrong operand types, bad subscript,
    /// zero division, wrong arity, failed `assert`, and similar.
    #[strum(serialize = "RuntimeError")]
    Runtime,
}

/// A source position, 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CodeLoc {
    pub line: u32,
    pub column: u32,
}

impl CodeLoc {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for CodeLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A fatal interpreter error: the kind, a human-readable message, and the
/// source position where the failure was detected (always present for lex
/// and parse errors, best-effort for runtime errors).
///
/// `Display` renders the single diagnostic line the CLI emits, e.g.
/// `RuntimeError: division by zero (line 3, column 9)`.
#[derive(Debug, Clone)]
pub struct Exception {
    kind: ErrorKind,
    message: String,
    position: Option<CodeLoc>,
}

impl Exception {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<CodeLoc>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn position(&self) -> Option<CodeLoc> {
        self.position
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(position) = self.position {
            write!(f, " ({position})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Exception {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_position() {
        let exc = Exception::new(ErrorKind::Runtime, "division by zero", Some(CodeLoc::new(3, 9)));
        assert_eq!(exc.to_string(), "RuntimeError: division by zero (line 3, column 9)");
    }

    #[test]
    fn display_without_position() {
        let exc = Exception::new(ErrorKind::Parse, "expected ';'", None);
        assert_eq!(exc.to_string(), "ParseError: expected ';'");
    }
}
