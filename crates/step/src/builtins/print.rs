//! Implementation of the print() builtin function.

use crate::{args::ArgValues, exception_private::RunResult, heap::Heap, intern::Interns, io::PrintWriter, value::Value};

/// Writes each argument's canonical string, separated by single spaces and
/// terminated by a newline. Variadic, including zero arguments (which
/// prints a bare newline). Returns `None`.
pub(super) fn builtin_print(
    heap: &mut Heap,
    args: ArgValues,
    interns: &Interns,
    print: &mut impl PrintWriter,
) -> RunResult<Value> {
    let mut first = true;
    for value in args.into_vec() {
        if first {
            first = false;
        } else {
            print.stdout_push(' ')?;
        }
        let output = value.str_value(heap, interns)?;
        print.stdout_write(output.into())?;
    }
    print.stdout_push('\n')?;
    Ok(Value::None)
}
