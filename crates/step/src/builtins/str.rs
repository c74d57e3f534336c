//! Implementation of the str() builtin function.

use crate::{
    args::ArgValues,
    exception_private::RunResult,
    heap::{Heap, HeapData},
    intern::Interns,
    value::Value,
};

/// Canonical string rendering of any value, as a fresh heap string.
///
/// Strings pass through unchanged; everything else renders the same text
/// that `print` would emit.
pub(super) fn builtin_str(heap: &mut Heap, args: ArgValues, interns: &Interns) -> RunResult<Value> {
    let value = args.get_one_arg("str")?;
    if value.as_str(heap, interns).is_some() {
        return Ok(value);
    }
    let output = value.str_value(heap, interns)?;
    Ok(Value::Ref(heap.allocate(HeapData::Str(output))))
}
