//! Name-to-value bindings: the global frame plus function-call frames.
//!
//! Scoping model: reads consult the top frame, then fall back to the
//! global frame; writes bind in the top frame. Every function call pushes
//! a fresh frame and pops it on exit, so locals never leak. At module
//! level the top frame *is* the global frame.

use ahash::AHashMap;

use crate::{
    exception_private::{RunError, RunResult},
    intern::StringId,
    value::Value,
};

/// Maximum depth of Step function call frames.
///
/// Checked before a frame is created so runaway recursion fails with a
/// runtime error instead of exhausting the Rust stack. The tree-walking
/// evaluator spends several Rust frames per Step call, so the limit is
/// sized to fit comfortably inside a debug-build test-thread stack.
pub(crate) const MAX_RECURSION_DEPTH: usize = 200;

#[derive(Debug, Default)]
struct Namespace(AHashMap<StringId, Value>);

/// Storage for all namespaces during execution. Index 0 is always the
/// global namespace.
#[derive(Debug)]
pub(crate) struct Namespaces {
    stack: Vec<Namespace>,
}

impl Namespaces {
    /// Creates namespaces seeded with the given global bindings.
    pub fn new(globals: impl IntoIterator<Item = (StringId, Value)>) -> Self {
        Self {
            stack: vec![Namespace(globals.into_iter().collect())],
        }
    }

    /// Looks up a name in the top frame, falling back to globals.
    pub fn get(&self, name: StringId) -> Option<Value> {
        let top = self.stack.last().expect("global namespace always exists");
        if let Some(value) = top.0.get(&name) {
            return Some(*value);
        }
        if self.stack.len() > 1 {
            return self.stack[0].0.get(&name).copied();
        }
        None
    }

    /// Binds or rebinds a name in the current (top) frame.
    pub fn set(&mut self, name: StringId, value: Value) {
        let top = self.stack.last_mut().expect("global namespace always exists");
        top.0.insert(name, value);
    }

    /// Binds a name in the global frame regardless of call depth.
    pub fn set_global(&mut self, name: StringId, value: Value) {
        self.stack[0].0.insert(name, value);
    }

    /// Pushes a call frame, checking the recursion limit first.
    pub fn push_frame(&mut self) -> RunResult<()> {
        if self.stack.len() > MAX_RECURSION_DEPTH {
            return Err(RunError::new("maximum recursion depth exceeded"));
        }
        self.stack.push(Namespace::default());
        Ok(())
    }

    /// Pops the current call frame.
    ///
    /// # Panics
    /// Panics when asked to pop the global frame; calls are always
    /// bracketed by push/pop pairs so this indicates an evaluator bug.
    pub fn pop_frame(&mut self) {
        assert!(self.stack.len() > 1, "cannot pop the global namespace");
        self.stack.pop();
    }
}
