//! Implementation of the append() builtin function.

use crate::{
    args::ArgValues,
    exception_private::{RunError, RunResult},
    heap::{Heap, HeapData},
    value::Value,
};

/// Appends the second argument to the list named by the first, mutating
/// the shared body in place. Returns `None`.
pub(super) fn builtin_append(heap: &mut Heap, args: ArgValues) -> RunResult<Value> {
    let (target, item) = args.get_two_args("append")?;
    let Some(list_id) = target.as_list(heap) else {
        return Err(RunError::new(format!(
            "append() first argument must be a list, not '{}'",
            target.type_name(heap)
        )));
    };
    if let HeapData::List(items) = heap.get_mut(list_id) {
        items.push(item);
    }
    Ok(Value::None)
}
