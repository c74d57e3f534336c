//! Implementation of the assert() builtin function.

use crate::{
    args::ArgValues,
    exception_private::{RunError, RunResult},
    heap::Heap,
    intern::Interns,
    io::PrintWriter,
    value::Value,
};

/// Returns `None` when the first argument is truthy. Otherwise the
/// optional second argument's canonical string is written to the output
/// sink and the program fails with a runtime error.
pub(super) fn builtin_assert(
    heap: &mut Heap,
    args: ArgValues,
    interns: &Interns,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let (test, message) = args.get_one_two_args("assert")?;
    if test.is_truthy(heap, interns) {
        return Ok(Value::None);
    }
    if let Some(message) = message {
        let output = message.str_value(heap, interns)?;
        print.stdout_write(output.into())?;
        print.stdout_push('\n')?;
    }
    Err(RunError::new("assertion failed"))
}
