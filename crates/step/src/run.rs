//! Public interface for running Step code, plus the tree-walking
//! evaluator.

use std::cmp::Ordering;

use num_integer::Integer as _;
use strum::IntoEnumIterator as _;

use crate::{
    args::ArgValues,
    builtins::Builtins,
    exception_private::{RunError, RunResult},
    exception_public::Exception,
    expressions::{CmpOperator, Expr, ExprLoc, Identifier, Literal, Node, Operator},
    function::{Function, FunctionId},
    heap::{Heap, HeapData},
    intern::{Interns, StringId},
    io::PrintWriter,
    namespace::Namespaces,
    parse::{CodeRange, parse},
    value::Value,
};

/// Primary interface for running Step code.
///
/// `Runner::new` parses the program once; `run` executes it against a
/// fresh heap and namespace, writing all output to the given writer.
///
/// # Example
/// ```
/// use step::{CollectStringPrint, Runner};
///
/// let runner = Runner::new("print(40 + 2);".to_owned()).unwrap();
/// let mut print = CollectStringPrint::new();
/// runner.run(&mut print).unwrap();
/// assert_eq!(print.output(), "42\n");
/// ```
#[derive(Debug)]
pub struct Runner {
    code: String,
    nodes: Vec<Node>,
    functions: Vec<Function>,
    interns: Interns,
}

impl Runner {
    /// Parses the given code, ready for execution.
    ///
    /// # Errors
    /// Returns an [`Exception`] of kind `Lex` or `Parse` when the code
    /// cannot be tokenized or parsed.
    pub fn new(code: String) -> Result<Self, Exception> {
        let module = parse(&code)?;
        Ok(Self {
            code,
            nodes: module.nodes,
            functions: module.functions,
            interns: module.interns,
        })
    }

    /// Returns the code that was parsed to create this runner.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Executes the program to completion.
    ///
    /// # Errors
    /// Returns an [`Exception`] of kind `Runtime` when execution fails
    /// (unbound name, bad operand types, failed `assert`, and so on).
    pub fn run(&self, print: &mut impl PrintWriter) -> Result<(), Exception> {
        let mut evaluator = Evaluator::new(&self.functions, &self.interns, print);
        evaluator
            .run_module(&self.nodes)
            .map_err(RunError::into_exception)
    }
}

/// Parses and runs `code` in one call, writing output to `print`.
pub fn run_code(code: &str, print: &mut impl PrintWriter) -> Result<(), Exception> {
    Runner::new(code.to_owned())?.run(print)
}

/// Out-of-band result of executing one statement.
///
/// `Break`/`Continue`/`Return` carry the statement position so the error
/// for one escaping its enclosing construct points at the right place.
#[derive(Debug)]
enum Signal {
    Normal,
    Break(CodeRange),
    Continue(CodeRange),
    Return(Value, CodeRange),
}

struct Evaluator<'a, W: PrintWriter> {
    heap: Heap,
    namespaces: Namespaces,
    functions: &'a [Function],
    interns: &'a Interns,
    print: &'a mut W,
}

impl<'a, W: PrintWriter> Evaluator<'a, W> {
    fn new(functions: &'a [Function], interns: &'a Interns, print: &'a mut W) -> Self {
        let globals = Builtins::iter().map(|builtin| {
            let name: &'static str = builtin.into();
            let name_id = interns.lookup(name).expect("builtin names are pre-interned");
            (name_id, Value::Builtin(builtin))
        });
        Self {
            heap: Heap::new(),
            namespaces: Namespaces::new(globals),
            functions,
            interns,
            print,
        }
    }

    fn run_module(&mut self, nodes: &[Node]) -> RunResult<()> {
        for node in nodes {
            match self.execute(node)? {
                Signal::Normal => {}
                Signal::Break(position) => {
                    return Err(RunError::new("'break' outside loop").at(position));
                }
                Signal::Continue(position) => {
                    return Err(RunError::new("'continue' outside loop").at(position));
                }
                Signal::Return(_, position) => {
                    return Err(RunError::new("'return' outside function").at(position));
                }
            }
        }
        Ok(())
    }

    fn execute(&mut self, node: &Node) -> RunResult<Signal> {
        match node {
            Node::Pass => Ok(Signal::Normal),
            Node::Expr(expr) => {
                self.evaluate(expr)?;
                Ok(Signal::Normal)
            }
            Node::If { test, body, or_else } => {
                let test_value = self.evaluate(test)?;
                if test_value.is_truthy(&self.heap, self.interns) {
                    self.exec_block(body)
                } else {
                    self.exec_block(or_else)
                }
            }
            Node::While { test, body } => loop {
                let test_value = self.evaluate(test)?;
                if !test_value.is_truthy(&self.heap, self.interns) {
                    return Ok(Signal::Normal);
                }
                match self.exec_block(body)? {
                    Signal::Normal | Signal::Continue(_) => {}
                    Signal::Break(_) => return Ok(Signal::Normal),
                    ret @ Signal::Return(..) => return Ok(ret),
                }
            },
            Node::Break { position } => Ok(Signal::Break(*position)),
            Node::Continue { position } => Ok(Signal::Continue(*position)),
            Node::Return { position, value } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::None,
                };
                Ok(Signal::Return(value, *position))
            }
            Node::FunctionDef { name, function_id } => {
                // `def` always binds in the global namespace
                self.namespaces.set_global(
                    name.name_id,
                    Value::Function {
                        id: *function_id,
                        name: name.name_id,
                    },
                );
                Ok(Signal::Normal)
            }
        }
    }

    /// Executes statements in order; the first non-normal signal
    /// propagates to the enclosing construct.
    fn exec_block(&mut self, nodes: &[Node]) -> RunResult<Signal> {
        for node in nodes {
            match self.execute(node)? {
                Signal::Normal => {}
                signal => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }

    fn evaluate(&mut self, expr: &ExprLoc) -> RunResult<Value> {
        match &expr.expr {
            Expr::Literal(literal) => Ok(literal_value(*literal)),
            Expr::Name(ident) => self.lookup(ident),
            Expr::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.evaluate(item)?);
                }
                Ok(Value::Ref(self.heap.allocate(HeapData::List(values))))
            }
            Expr::Op { left, op, right } => {
                let l = self.evaluate(left)?;
                let r = self.evaluate(right)?;
                match op {
                    // both sides are evaluated; the result is 1 or 0
                    Operator::And => Ok(bool_value(
                        l.is_truthy(&self.heap, self.interns) && r.is_truthy(&self.heap, self.interns),
                    )),
                    Operator::Or => Ok(bool_value(
                        l.is_truthy(&self.heap, self.interns) || r.is_truthy(&self.heap, self.interns),
                    )),
                    _ => self.binary_op(*op, l, r).map_err(|e| e.at(expr.position)),
                }
            }
            Expr::CmpOp { left, op, right } => {
                let l = self.evaluate(left)?;
                let r = self.evaluate(right)?;
                self.compare_op(*op, l, r).map_err(|e| e.at(expr.position))
            }
            Expr::UnaryMinus(operand) => {
                let value = self.evaluate(operand)?;
                match value {
                    Value::Int(v) => v
                        .checked_neg()
                        .map(Value::Int)
                        .ok_or_else(|| RunError::new("integer overflow").at(expr.position)),
                    Value::Float(v) => Ok(Value::Float(-v)),
                    other => Err(RunError::new(format!(
                        "bad operand type for unary -: '{}'",
                        other.type_name(&self.heap)
                    ))
                    .at(expr.position)),
                }
            }
            Expr::Subscript { object, index } => {
                let obj = self.evaluate(object)?;
                let idx = self.evaluate(index)?;
                self.subscript(obj, idx).map_err(|e| e.at(expr.position))
            }
            Expr::Call { callable, args } => {
                let callee = self.evaluate(callable)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate(arg)?);
                }
                match callee {
                    Value::Builtin(builtin) => builtin
                        .call(&mut self.heap, ArgValues::from_vec(values), self.interns, &mut *self.print)
                        .map_err(|e| e.at(expr.position)),
                    Value::Function { id, name } => self.call_function(id, name, values, expr.position),
                    other => Err(RunError::new(format!(
                        "'{}' object is not callable",
                        other.type_name(&self.heap)
                    ))
                    .at(expr.position)),
                }
            }
            Expr::Assign { target, object } => {
                let value = self.evaluate(object)?;
                self.namespaces.set(target.name_id, value);
                Ok(value)
            }
            Expr::SubscriptAssign { target, index, value } => {
                let obj = self.evaluate(target)?;
                let idx = self.evaluate(index)?;
                let stored = self.evaluate(value)?;
                self.store_subscript(obj, idx, stored)
                    .map_err(|e| e.at(expr.position))?;
                Ok(stored)
            }
        }
    }

    fn lookup(&self, ident: &Identifier) -> RunResult<Value> {
        self.namespaces.get(ident.name_id).ok_or_else(|| {
            RunError::new(format!(
                "name '{}' is not defined",
                self.interns.get_str(ident.name_id)
            ))
            .at(ident.position)
        })
    }

    fn call_function(
        &mut self,
        id: FunctionId,
        name: StringId,
        args: Vec<Value>,
        position: CodeRange,
    ) -> RunResult<Value> {
        let functions = self.functions;
        let function = &functions[id.index()];
        if args.len() != function.params.len() {
            let plural = if function.params.len() == 1 { "" } else { "s" };
            return Err(RunError::new(format!(
                "{}() takes {} argument{plural} ({} given)",
                self.interns.get_str(name),
                function.params.len(),
                args.len()
            ))
            .at(position));
        }
        self.namespaces.push_frame().map_err(|e| e.at(position))?;
        for (param, value) in function.params.iter().zip(args) {
            self.namespaces.set(*param, value);
        }
        let result = self.exec_function_body(&function.body);
        self.namespaces.pop_frame();
        result
    }

    /// Runs a function body; falling off the end yields `None`.
    fn exec_function_body(&mut self, body: &[Node]) -> RunResult<Value> {
        for node in body {
            match self.execute(node)? {
                Signal::Normal => {}
                Signal::Return(value, _) => return Ok(value),
                Signal::Break(position) => {
                    return Err(RunError::new("'break' outside loop").at(position));
                }
                Signal::Continue(position) => {
                    return Err(RunError::new("'continue' outside loop").at(position));
                }
            }
        }
        Ok(Value::None)
    }

    fn subscript(&mut self, obj: Value, index: Value) -> RunResult<Value> {
        if let Some(list_id) = obj.as_list(&self.heap) {
            let items = self.heap.list(list_id);
            let i = as_index(index, items.len(), "list")?;
            return Ok(items[i]);
        }
        if let Some(s) = obj.as_str(&self.heap, self.interns) {
            let i = as_index(index, s.len(), "string")?;
            // source programs are ASCII, so one byte is one character
            return Ok(Value::InternStr(StringId::from_ascii(s.as_bytes()[i])));
        }
        Err(RunError::new(format!(
            "'{}' object is not subscriptable",
            obj.type_name(&self.heap)
        )))
    }

    fn store_subscript(&mut self, obj: Value, index: Value, value: Value) -> RunResult<()> {
        let Some(list_id) = obj.as_list(&self.heap) else {
            return Err(RunError::new(format!(
                "'{}' object does not support item assignment",
                obj.type_name(&self.heap)
            )));
        };
        let len = self.heap.list(list_id).len();
        let i = as_index(index, len, "list")?;
        if let HeapData::List(items) = self.heap.get_mut(list_id) {
            items[i] = value;
        }
        Ok(())
    }

    /// Arithmetic dispatch for `+ - * / %` (logical operators are handled
    /// by the truthiness path in `evaluate`).
    fn binary_op(&mut self, op: Operator, left: Value, right: Value) -> RunResult<Value> {
        if let Some(pair) = NumPair::from_values(left, right) {
            return numeric_op(op, pair);
        }
        match op {
            Operator::Add => self.add_non_numeric(left, right),
            Operator::Mult => self.mul_non_numeric(left, right),
            _ => Err(self.op_type_error(op, left, right)),
        }
    }

    /// `+` on strings (concatenation) and lists (a fresh heap list).
    fn add_non_numeric(&mut self, left: Value, right: Value) -> RunResult<Value> {
        let concat = match (
            left.as_str(&self.heap, self.interns),
            right.as_str(&self.heap, self.interns),
        ) {
            (Some(l), Some(r)) => Some([l, r].concat()),
            _ => None,
        };
        if let Some(s) = concat {
            return Ok(Value::Ref(self.heap.allocate(HeapData::Str(s))));
        }
        if let (Some(a), Some(b)) = (left.as_list(&self.heap), right.as_list(&self.heap)) {
            let items: Vec<Value> = self
                .heap
                .list(a)
                .iter()
                .chain(self.heap.list(b))
                .copied()
                .collect();
            return Ok(Value::Ref(self.heap.allocate(HeapData::List(items))));
        }
        Err(self.op_type_error(Operator::Add, left, right))
    }

    /// `*` on string/int and list/int, in either operand order. A
    /// non-positive count yields an empty sequence; replicated list
    /// elements share handles rather than being cloned.
    fn mul_non_numeric(&mut self, left: Value, right: Value) -> RunResult<Value> {
        let (seq, count) = match (left, right) {
            (Value::Int(n), seq) => (seq, n),
            (seq, Value::Int(n)) => (seq, n),
            _ => return Err(self.op_type_error(Operator::Mult, left, right)),
        };
        let count = usize::try_from(count).unwrap_or(0);
        if let Some(s) = seq.as_str(&self.heap, self.interns) {
            let repeated = s.repeat(count);
            return Ok(Value::Ref(self.heap.allocate(HeapData::Str(repeated))));
        }
        if let Some(id) = seq.as_list(&self.heap) {
            let items = {
                let body = self.heap.list(id);
                let mut items = Vec::with_capacity(body.len().saturating_mul(count));
                for _ in 0..count {
                    items.extend_from_slice(body);
                }
                items
            };
            return Ok(Value::Ref(self.heap.allocate(HeapData::List(items))));
        }
        Err(self.op_type_error(Operator::Mult, left, right))
    }

    fn compare_op(&self, op: CmpOperator, left: Value, right: Value) -> RunResult<Value> {
        match op {
            CmpOperator::Eq => Ok(bool_value(left.equals(right, &self.heap, self.interns)?)),
            CmpOperator::NotEq => Ok(bool_value(!left.equals(right, &self.heap, self.interns)?)),
            _ => {
                let Some(ordering) = left.compare(right) else {
                    return Err(RunError::new(format!(
                        "'{op}' not supported between instances of '{}' and '{}'",
                        left.type_name(&self.heap),
                        right.type_name(&self.heap)
                    )));
                };
                let result = match op {
                    CmpOperator::Lt => ordering == Ordering::Less,
                    CmpOperator::LtE => ordering != Ordering::Greater,
                    CmpOperator::Gt => ordering == Ordering::Greater,
                    CmpOperator::GtE => ordering != Ordering::Less,
                    CmpOperator::Eq | CmpOperator::NotEq => unreachable!("handled above"),
                };
                Ok(bool_value(result))
            }
        }
    }

    fn op_type_error(&self, op: Operator, left: Value, right: Value) -> RunError {
        RunError::new(format!(
            "unsupported operand type(s) for {op}: '{}' and '{}'",
            left.type_name(&self.heap),
            right.type_name(&self.heap)
        ))
    }
}

fn literal_value(literal: Literal) -> Value {
    match literal {
        Literal::None => Value::None,
        Literal::Int(v) => Value::Int(v),
        Literal::Float(v) => Value::Float(v),
        Literal::Str(string_id) => Value::InternStr(string_id),
    }
}

/// Comparison and logical results are the integers `1` and `0`.
fn bool_value(b: bool) -> Value {
    Value::Int(i64::from(b))
}

/// Checks that a subscript index is integer-valued and in range.
fn as_index(index: Value, len: usize, what: &str) -> RunResult<usize> {
    let raw = match index {
        Value::Int(v) => v,
        // an integer-valued float is accepted; saturation is harmless
        // because any saturated value is out of range anyway
        Value::Float(f) if f.fract() == 0.0 => f as i64,
        Value::Float(_) => {
            return Err(RunError::new(format!("{what} index must be an integer")));
        }
        _ => return Err(RunError::new(format!("{what} indices must be integers"))),
    };
    if raw < 0 || raw as usize >= len {
        return Err(RunError::new(format!("{what} index out of range")));
    }
    Ok(raw as usize)
}

/// Numeric operand pair after int/float promotion: float if either side
/// is float, otherwise int.
enum NumPair {
    Ints(i64, i64),
    Floats(f64, f64),
}

impl NumPair {
    fn from_values(left: Value, right: Value) -> Option<Self> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Some(Self::Ints(a, b)),
            (Value::Int(a), Value::Float(b)) => Some(Self::Floats(a as f64, b)),
            (Value::Float(a), Value::Int(b)) => Some(Self::Floats(a, b as f64)),
            (Value::Float(a), Value::Float(b)) => Some(Self::Floats(a, b)),
            _ => None,
        }
    }
}

fn checked(result: Option<i64>) -> RunResult<Value> {
    result.map(Value::Int).ok_or_else(|| RunError::new("integer overflow"))
}

fn numeric_op(op: Operator, pair: NumPair) -> RunResult<Value> {
    match (op, pair) {
        (Operator::Add, NumPair::Ints(a, b)) => checked(a.checked_add(b)),
        (Operator::Add, NumPair::Floats(a, b)) => Ok(Value::Float(a + b)),
        (Operator::Sub, NumPair::Ints(a, b)) => checked(a.checked_sub(b)),
        (Operator::Sub, NumPair::Floats(a, b)) => Ok(Value::Float(a - b)),
        (Operator::Mult, NumPair::Ints(a, b)) => checked(a.checked_mul(b)),
        (Operator::Mult, NumPair::Floats(a, b)) => Ok(Value::Float(a * b)),
        (Operator::Div, NumPair::Ints(a, b)) => {
            if b == 0 {
                return Err(RunError::new("division by zero"));
            }
            if b == -1 {
                // division by -1 is negation; i64::MIN % -1 would overflow
                return checked(a.checked_neg());
            }
            // integer division stays integer only when it is exact
            if a % b == 0 {
                checked(a.checked_div(b))
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        (Operator::Div, NumPair::Floats(a, b)) => {
            if b == 0.0 {
                return Err(RunError::new("division by zero"));
            }
            Ok(Value::Float(a / b))
        }
        (Operator::Mod, NumPair::Ints(a, b)) => {
            if b == 0 {
                return Err(RunError::new("modulo by zero"));
            }
            if b == -1 {
                // avoids the i64::MIN % -1 overflow inside mod_floor
                return Ok(Value::Int(0));
            }
            Ok(Value::Int(a.mod_floor(&b)))
        }
        (Operator::Mod, NumPair::Floats(a, b)) => {
            if b == 0.0 {
                return Err(RunError::new("modulo by zero"));
            }
            // floor-mod: the result carries the sign of the divisor
            Ok(Value::Float(a - b * (a / b).floor()))
        }
        (Operator::And | Operator::Or, _) => {
            unreachable!("logical operators are evaluated by the truthiness path")
        }
    }
}
