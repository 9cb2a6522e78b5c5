//! The dynamically-typed numeric value model.
//!
//! A `Value` is an `i64` or an `f64`, parsed from whatever text form the
//! script supplies. One coercion rule covers all arithmetic and comparison:
//! if either operand is a double, both coerce to `f64` and the operation is
//! IEEE-754 (division by zero yields infinity or NaN, never an error);
//! otherwise both stay `i64` with truncating, wrapping arithmetic, and a
//! zero divisor is a [`division_by_zero`] failure.

use std::cmp::Ordering;
use std::fmt;

use stencil_ir::format_double;

use crate::errors::{division_by_zero, not_numeric, EvalResult};

/// A number: integer or double.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Double(f64),
}

impl Value {
    /// Parse a value from an optional text form.
    ///
    /// Absent text is `Integer(0)`. Present text must parse as an `i64`
    /// (preferred) or an `f64`; anything else fails with the type-error
    /// kind.
    pub fn parse(text: Option<&str>) -> EvalResult<Value> {
        match text {
            None => Ok(Value::Integer(0)),
            Some(text) => Value::parse_str(text),
        }
    }

    /// Parse a value from its text form.
    pub fn parse_str(text: &str) -> EvalResult<Value> {
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Value::Integer(value));
        }
        if let Ok(value) = text.parse::<f64>() {
            return Ok(Value::Double(value));
        }
        Err(not_numeric(text))
    }

    /// The value as an `f64`, for double-typed operations.
    pub fn as_double(self) -> f64 {
        match self {
            Value::Integer(n) => n as f64,
            Value::Double(d) => d,
        }
    }

    pub fn add(self, rhs: Value) -> EvalResult<Value> {
        self.arith(rhs, i64::wrapping_add, |a, b| a + b)
    }

    pub fn sub(self, rhs: Value) -> EvalResult<Value> {
        self.arith(rhs, i64::wrapping_sub, |a, b| a - b)
    }

    pub fn mul(self, rhs: Value) -> EvalResult<Value> {
        self.arith(rhs, i64::wrapping_mul, |a, b| a * b)
    }

    /// Divide. Integer division truncates and fails on a zero divisor;
    /// double division is IEEE-754 and never fails.
    pub fn div(self, rhs: Value) -> EvalResult<Value> {
        match (self, rhs) {
            (Value::Integer(_), Value::Integer(0)) => Err(division_by_zero()),
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_div(b))),
            _ => Ok(Value::Double(self.as_double() / rhs.as_double())),
        }
    }

    /// Three-way comparison under the coercion rule. Doubles compare with a
    /// total order, NaN greater than everything, so loop bounds are never
    /// stuck on an unordered pair.
    pub fn compare(self, rhs: Value) -> Ordering {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(&b),
            _ => self.as_double().total_cmp(&rhs.as_double()),
        }
    }

    fn arith(
        self,
        rhs: Value,
        int_op: impl Fn(i64, i64) -> i64,
        double_op: impl Fn(f64, f64) -> f64,
    ) -> EvalResult<Value> {
        match (self, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(int_op(a, b))),
            _ => Ok(Value::Double(double_op(self.as_double(), rhs.as_double()))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Double(d) => f.write_str(&format_double(*d)),
        }
    }
}
