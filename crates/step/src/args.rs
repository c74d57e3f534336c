//! Call-argument carrier for builtin dispatch.
//!
//! Specific variants cover the common 0-2 argument calls without a Vec
//! allocation; the helpers produce uniform wrong-arity errors.

use crate::{
    exception_private::{RunError, RunResult},
    value::Value,
};

#[derive(Debug)]
pub(crate) enum ArgValues {
    Empty,
    One(Value),
    Two(Value, Value),
    Many(Vec<Value>),
}

impl ArgValues {
    pub fn from_vec(mut values: Vec<Value>) -> Self {
        match values.len() {
            0 => Self::Empty,
            1 => Self::One(values.remove(0)),
            2 => {
                let second = values.remove(1);
                Self::Two(values.remove(0), second)
            }
            _ => Self::Many(values),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
            Self::Many(values) => values.len(),
        }
    }

    /// Checks that exactly one argument was passed, returning it.
    pub fn get_one_arg(self, name: &str) -> RunResult<Value> {
        match self {
            Self::One(a) => Ok(a),
            other => Err(arg_count_error(name, "exactly one argument", other.count())),
        }
    }

    /// Checks that exactly two arguments were passed.
    pub fn get_two_args(self, name: &str) -> RunResult<(Value, Value)> {
        match self {
            Self::Two(a, b) => Ok((a, b)),
            other => Err(arg_count_error(name, "exactly two arguments", other.count())),
        }
    }

    /// Checks that one or two arguments were passed.
    pub fn get_one_two_args(self, name: &str) -> RunResult<(Value, Option<Value>)> {
        match self {
            Self::One(a) => Ok((a, None)),
            Self::Two(a, b) => Ok((a, Some(b))),
            other => Err(arg_count_error(name, "one or two arguments", other.count())),
        }
    }

    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(a) => vec![a],
            Self::Two(a, b) => vec![a, b],
            Self::Many(values) => values,
        }
    }
}

fn arg_count_error(name: &str, expected: &str, given: usize) -> RunError {
    RunError::new(format!("{name}() takes {expected} ({given} given)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_picks_compact_variants() {
        assert!(matches!(ArgValues::from_vec(vec![]), ArgValues::Empty));
        assert!(matches!(ArgValues::from_vec(vec![Value::Int(1)]), ArgValues::One(_)));
        assert!(matches!(
            ArgValues::from_vec(vec![Value::Int(1), Value::Int(2)]),
            ArgValues::Two(..)
        ));
        assert_eq!(ArgValues::from_vec(vec![Value::None; 5]).count(), 5);
    }

    #[test]
    fn arity_helpers_report_given_count() {
        let err = ArgValues::Empty.get_one_arg("len").unwrap_err();
        let exc = err.into_exception();
        assert!(exc.message().contains("len() takes exactly one argument (0 given)"));
    }
}
