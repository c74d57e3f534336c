//! User-defined functions.

use crate::{expressions::Node, intern::StringId};

/// Index into the module's function table.
///
/// Two callables are equal iff they share an id, which gives the
/// identity-equality the language defines for functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FunctionId(u32);

impl FunctionId {
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("function table overflow"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A function defined with `def`.
///
/// Calling one pushes a fresh namespace frame, binds the parameters in
/// order, and executes the body; falling off the end yields `None`.
#[derive(Debug, Clone)]
pub(crate) struct Function {
    /// The function name (used for error messages and rendering).
    pub name: StringId,
    /// Parameter names in declaration order.
    pub params: Vec<StringId>,
    /// The function body statements.
    pub body: Vec<Node>,
}
