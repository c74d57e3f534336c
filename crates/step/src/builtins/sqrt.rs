//! Implementation of the sqrt() builtin function.

use crate::{
    args::ArgValues,
    exception_private::{RunError, RunResult},
    heap::Heap,
    value::Value,
};

/// Float square root of a number; negative input is an error.
pub(super) fn builtin_sqrt(heap: &mut Heap, args: ArgValues) -> RunResult<Value> {
    let value = args.get_one_arg("sqrt")?;
    let operand = match value {
        Value::Int(v) => v as f64,
        Value::Float(v) => v,
        _ => {
            return Err(RunError::new(format!(
                "sqrt() argument must be a number, not '{}'",
                value.type_name(heap)
            )));
        }
    };
    if operand < 0.0 {
        return Err(RunError::new("sqrt() of a negative number"));
    }
    Ok(Value::Float(operand.sqrt()))
}
