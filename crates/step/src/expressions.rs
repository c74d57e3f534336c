//! Expression and statement tree produced by the parser.

use strum::Display;

use crate::{function::FunctionId, intern::StringId, parse::CodeRange};

/// An identifier (variable or function name) with source location.
///
/// The name is stored as a `StringId`; look it up in `Interns` to get the
/// actual string.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Identifier {
    pub position: CodeRange,
    pub name_id: StringId,
}

/// An expression in the AST.
#[derive(Debug, Clone)]
pub(crate) enum Expr {
    Literal(Literal),
    Name(Identifier),
    /// List literal: `[e1, e2, ...]`. Evaluation mints a fresh heap list.
    List(Vec<ExprLoc>),
    Op {
        left: Box<ExprLoc>,
        op: Operator,
        right: Box<ExprLoc>,
    },
    CmpOp {
        left: Box<ExprLoc>,
        op: CmpOperator,
        right: Box<ExprLoc>,
    },
    /// Unary minus expression - negates a numeric value.
    UnaryMinus(Box<ExprLoc>),
    Subscript {
        object: Box<ExprLoc>,
        index: Box<ExprLoc>,
    },
    /// Call expression. The callable is an arbitrary expression; builtins
    /// are just values looked up from the global namespace, so `p = print;
    /// p(1);` works.
    Call {
        callable: Box<ExprLoc>,
        args: Vec<ExprLoc>,
    },
    /// Assignment to a name: `x = value`.
    ///
    /// Assignment is an expression in Step; its value is the assigned
    /// value, and it is right-associative (`a = b = 1`).
    Assign {
        target: Identifier,
        object: Box<ExprLoc>,
    },
    /// Assignment through a subscript: `obj[index] = value`.
    ///
    /// Evaluation order is object, index, value; the list body is mutated
    /// in place so every alias observes the store.
    SubscriptAssign {
        target: Box<ExprLoc>,
        index: Box<ExprLoc>,
        value: Box<ExprLoc>,
    },
}

/// A literal produced directly by the parser.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Literal {
    None,
    Int(i64),
    Float(f64),
    /// An interned string literal.
    Str(StringId),
}

/// An expression with its source location.
#[derive(Debug, Clone)]
pub(crate) struct ExprLoc {
    pub position: CodeRange,
    pub expr: Expr,
}

impl ExprLoc {
    pub fn new(position: CodeRange, expr: Expr) -> Self {
        Self { position, expr }
    }
}

/// A statement in the AST.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    /// No-op statement (a bare `;`).
    Pass,
    Expr(ExprLoc),
    If {
        test: ExprLoc,
        body: Vec<Node>,
        or_else: Vec<Node>,
    },
    While {
        test: ExprLoc,
        body: Vec<Node>,
    },
    /// Break statement - exits the innermost loop. Executing one outside a
    /// loop is a runtime error, reported at this position.
    Break {
        position: CodeRange,
    },
    /// Continue statement - jumps to the next iteration of the innermost
    /// loop. Outside a loop it is a runtime error.
    Continue {
        position: CodeRange,
    },
    Return {
        position: CodeRange,
        value: Option<ExprLoc>,
    },
    /// Function definition. The body lives in the module's function table;
    /// executing the statement binds the name in the global namespace.
    FunctionDef {
        name: Identifier,
        function_id: FunctionId,
    },
}

/// Binary operators.
///
/// `and`/`or` share a single precedence level in the grammar and are
/// handled by the evaluator's truthiness path rather than the arithmetic
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "or")]
    Or,
}

/// Defined separately since these operators always yield `1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum CmpOperator {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    LtE,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    GtE,
}
