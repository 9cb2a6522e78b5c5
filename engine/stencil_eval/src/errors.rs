//! Execution error types.
//!
//! Factory functions are the construction API; callers match on the enum
//! when they need to distinguish failure modes. The one failure the engine
//! recovers from locally — an unknown echo function name — is not an error
//! at all: it degrades to a diagnostic string on the value stack.

use std::fmt;

use crate::sink::SinkError;

/// Result of an execution step.
pub type EvalResult<T> = Result<T, EvalError>;

/// A fatal execution failure.
///
/// Execution aborts at the first error; output already written to the sink
/// stays written (no transactional rollback).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// A value used in numeric context is neither an integer, a double, nor
    /// a numeric string.
    NotNumeric {
        /// Text form of the offending value.
        text: String,
    },
    /// Integer division with a zero divisor. Double division never fails.
    DivisionByZero,
    /// A variable name with no current binding in the scoped stack table.
    Unbound {
        /// The unbound name.
        name: String,
    },
    /// An echo expression popped from an empty value stack.
    StackUnderflow,
    /// The sink reported a write failure.
    Sink(SinkError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::NotNumeric { text } => write!(
                f,
                "value must be integer, double, or a numeric string (got `{text}`)"
            ),
            EvalError::DivisionByZero => write!(f, "integer division by zero"),
            EvalError::Unbound { name } => {
                write!(f, "variable `{name}` has no current binding")
            }
            EvalError::StackUnderflow => write!(f, "echo expression stack is empty"),
            EvalError::Sink(e) => write!(f, "sink failure: {e}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<SinkError> for EvalError {
    fn from(e: SinkError) -> Self {
        EvalError::Sink(e)
    }
}

/// A value that cannot be coerced to a number.
pub fn not_numeric(text: impl Into<String>) -> EvalError {
    EvalError::NotNumeric { text: text.into() }
}

/// Integer division by zero.
pub fn division_by_zero() -> EvalError {
    EvalError::DivisionByZero
}

/// A read of a name with no current binding.
pub fn unbound(name: impl Into<String>) -> EvalError {
    EvalError::Unbound { name: name.into() }
}

/// A pop from an empty echo value stack.
pub fn stack_underflow() -> EvalError {
    EvalError::StackUnderflow
}
