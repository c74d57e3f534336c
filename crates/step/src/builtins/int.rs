//! Implementation of the int() builtin function.

use crate::{
    args::ArgValues,
    exception_private::{RunError, RunResult},
    heap::Heap,
    intern::Interns,
    value::Value,
};

/// Converts a number (truncating toward zero) or a decimal string to an
/// integer.
pub(super) fn builtin_int(heap: &mut Heap, args: ArgValues, interns: &Interns) -> RunResult<Value> {
    let value = args.get_one_arg("int")?;
    match value {
        Value::Int(_) => Ok(value),
        Value::Float(f) => {
            let truncated = f.trunc();
            // the bounds check keeps the f64 -> i64 cast lossless
            if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
                return Err(RunError::new(format!(
                    "cannot convert float {} to int",
                    crate::value::float_repr(f)
                )));
            }
            Ok(Value::Int(truncated as i64))
        }
        _ => {
            if let Some(s) = value.as_str(heap, interns) {
                return s
                    .trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|_| RunError::new(format!("invalid literal for int(): '{s}'")));
            }
            Err(RunError::new(format!(
                "int() argument must be a number or string, not '{}'",
                value.type_name(heap)
            )))
        }
    }
}
