//! Internal runtime error plumbing.
//!
//! The evaluator and builtins work with `RunError`, which carries a message
//! and, once an enclosing expression attaches it, a source range. At the
//! public boundary (`Runner::run`) a `RunError` becomes an
//! [`Exception`] of kind [`ErrorKind::Runtime`].

use std::borrow::Cow;

use crate::{
    exception_public::{ErrorKind, Exception},
    parse::CodeRange,
};

/// Result type alias for operations that can produce a runtime error.
pub(crate) type RunResult<T> = Result<T, RunError>;

/// A runtime error in flight.
///
/// Low-level helpers construct these without a position; the evaluator
/// fills in the position of the innermost expression that observed the
/// failure via [`RunError::at`].
#[derive(Debug, Clone)]
pub(crate) struct RunError {
    msg: Cow<'static, str>,
    position: Option<CodeRange>,
}

impl RunError {
    pub fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Self {
            msg: msg.into(),
            position: None,
        }
    }

    /// Attaches a source range unless one is already set.
    ///
    /// Errors keep the position closest to the failure, so outer
    /// expressions never overwrite what an inner one recorded.
    #[must_use]
    pub fn at(mut self, position: CodeRange) -> Self {
        if self.position.is_none() {
            self.position = Some(position);
        }
        self
    }

    pub fn into_exception(self) -> Exception {
        Exception::new(ErrorKind::Runtime, self.msg, self.position.map(|p| p.start()))
    }
}

impl From<Exception> for RunError {
    /// Lets writer failures from [`crate::io::PrintWriter`] propagate back
    /// through the evaluator's `RunResult` plumbing.
    fn from(exception: Exception) -> Self {
        Self {
            msg: exception.message().to_owned().into(),
            position: exception.position().map(CodeRange::single),
        }
    }
}
