//! Implementation of the len() builtin function.

use crate::{
    args::ArgValues,
    exception_private::{RunError, RunResult},
    heap::Heap,
    intern::Interns,
    value::Value,
};

/// String length in bytes, or list length in elements.
pub(super) fn builtin_len(heap: &mut Heap, args: ArgValues, interns: &Interns) -> RunResult<Value> {
    let value = args.get_one_arg("len")?;
    if let Some(s) = value.as_str(heap, interns) {
        return Ok(Value::Int(s.len() as i64));
    }
    if let Some(id) = value.as_list(heap) {
        return Ok(Value::Int(heap.list(id).len() as i64));
    }
    Err(RunError::new(format!(
        "object of type '{}' has no len()",
        value.type_name(heap)
    )))
}
