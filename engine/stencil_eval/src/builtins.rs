//! The built-in echo functions.
//!
//! Every function operates on the shared echo value stack and, where it
//! touches host state, the execution sink. Names are matched
//! case-insensitively. An unrecognized name is not fatal: it pushes a
//! diagnostic string so the script keeps running and the miss shows up in
//! the rendered output.

use std::f64::consts::PI;

use crate::engine::StackValue;
use crate::errors::{stack_underflow, EvalResult};
use crate::format::format_decimal;
use crate::sink::ExecutionSink;

/// Apply the function called `name` to `stack`.
pub fn apply<S: ExecutionSink>(
    name: &str,
    stack: &mut Vec<StackValue>,
    sink: &mut S,
) -> EvalResult<()> {
    match name.to_ascii_lowercase().as_str() {
        "sin" => sin(stack),
        "decfmt" => decfmt(stack),
        "dup" => dup(stack),
        "swap" => swap(stack),
        "setmimetype" => set_mime_type(stack, sink),
        "paramget" => get_with_default(stack, |n| sink.parameter(n)),
        "pparamget" => get_with_default(stack, |n| sink.persistent_parameter(n)),
        "pparamset" => set_parameter(stack, |n, v| sink.set_persistent_parameter(n, v)),
        "pparamdel" => del_parameter(stack, |n| sink.remove_persistent_parameter(n)),
        "tparamget" => get_with_default(stack, |n| sink.temporary_parameter(n)),
        "tparamset" => set_parameter(stack, |n, v| sink.set_temporary_parameter(n, v)),
        "tparamdel" => del_parameter(stack, |n| sink.remove_temporary_parameter(n)),
        _ => {
            stack.push(StackValue::Str(format!("unknown function name: {name}")));
            Ok(())
        }
    }
}

fn pop(stack: &mut Vec<StackValue>) -> EvalResult<StackValue> {
    stack.pop().ok_or_else(stack_underflow)
}

/// Sine of an angle given in degrees.
fn sin(stack: &mut Vec<StackValue>) -> EvalResult<()> {
    let degrees = pop(stack)?.to_value()?.as_double();
    stack.push(StackValue::Double((degrees * PI / 180.0).sin()));
    Ok(())
}

/// Pops the pattern, then the value; pushes the formatted string.
fn decfmt(stack: &mut Vec<StackValue>) -> EvalResult<()> {
    let pattern = pop(stack)?.to_string();
    let value = pop(stack)?.to_value()?.as_double();
    stack.push(StackValue::Str(format_decimal(value, &pattern)));
    Ok(())
}

fn dup(stack: &mut Vec<StackValue>) -> EvalResult<()> {
    let top = stack.last().cloned().ok_or_else(stack_underflow)?;
    stack.push(top);
    Ok(())
}

fn swap(stack: &mut Vec<StackValue>) -> EvalResult<()> {
    let a = pop(stack)?;
    let b = pop(stack)?;
    stack.push(a);
    stack.push(b);
    Ok(())
}

fn set_mime_type<S: ExecutionSink>(stack: &mut Vec<StackValue>, sink: &mut S) -> EvalResult<()> {
    let mime_type = pop(stack)?.to_string();
    sink.set_mime_type(&mime_type);
    Ok(())
}

/// Pops the default, then the name; pushes the stored value or the default.
fn get_with_default(
    stack: &mut Vec<StackValue>,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> EvalResult<()> {
    let default = pop(stack)?;
    let name = pop(stack)?.to_string();
    match lookup(&name) {
        Some(value) => stack.push(StackValue::Str(value)),
        None => stack.push(default),
    }
    Ok(())
}

/// Pops the name, then the value to store under it.
fn set_parameter(
    stack: &mut Vec<StackValue>,
    store: impl FnOnce(&str, &str),
) -> EvalResult<()> {
    let name = pop(stack)?.to_string();
    let value = pop(stack)?.to_string();
    store(&name, &value);
    Ok(())
}

fn del_parameter(stack: &mut Vec<StackValue>, remove: impl FnOnce(&str)) -> EvalResult<()> {
    let name = pop(stack)?.to_string();
    remove(&name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::apply;
    use crate::engine::StackValue;
    use crate::errors::EvalError;
    use crate::sink::{BufferSink, ExecutionSink};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn run(name: &str, stack: Vec<StackValue>) -> Vec<StackValue> {
        let mut sink = BufferSink::new();
        run_with(name, stack, &mut sink)
    }

    fn run_with(name: &str, mut stack: Vec<StackValue>, sink: &mut BufferSink) -> Vec<StackValue> {
        match apply(name, &mut stack, sink) {
            Ok(()) => stack,
            Err(e) => panic!("function {name} failed: {e}"),
        }
    }

    #[test]
    fn sin_takes_degrees() {
        let stack = run("sin", vec![StackValue::Integer(90)]);
        assert_eq!(stack, vec![StackValue::Double(1.0)]);
    }

    #[test]
    fn sin_is_case_insensitive() {
        let stack = run("SIN", vec![StackValue::Integer(0)]);
        assert_eq!(stack, vec![StackValue::Double(0.0)]);
    }

    #[test]
    fn decfmt_pops_pattern_then_value() {
        let stack = run(
            "decfmt",
            vec![
                StackValue::Double(3.14159),
                StackValue::Str("0.00".to_string()),
            ],
        );
        assert_eq!(stack, vec![StackValue::Str("3.14".to_string())]);
    }

    #[test]
    fn dup_copies_the_top() {
        let stack = run("dup", vec![StackValue::Integer(7)]);
        assert_eq!(stack, vec![StackValue::Integer(7), StackValue::Integer(7)]);
    }

    #[test]
    fn swap_exchanges_the_top_two() {
        let stack = run("swap", vec![StackValue::Integer(1), StackValue::Integer(2)]);
        assert_eq!(stack, vec![StackValue::Integer(2), StackValue::Integer(1)]);
    }

    #[test]
    fn set_mime_type_reaches_the_sink() {
        let mut sink = BufferSink::new();
        let stack = run_with(
            "setMimeType",
            vec![StackValue::Str("text/plain".to_string())],
            &mut sink,
        );
        assert!(stack.is_empty());
        assert_eq!(sink.mime_type, Some("text/plain".to_string()));
    }

    #[test]
    fn paramget_uses_default_when_absent() {
        let mut sink = BufferSink::new().with_parameter("broj", "4");
        let stack = run_with(
            "paramGet",
            vec![
                StackValue::Str("broj".to_string()),
                StackValue::Integer(3),
            ],
            &mut sink,
        );
        assert_eq!(stack, vec![StackValue::Str("4".to_string())]);

        let stack = run_with(
            "paramGet",
            vec![
                StackValue::Str("other".to_string()),
                StackValue::Integer(3),
            ],
            &mut sink,
        );
        assert_eq!(stack, vec![StackValue::Integer(3)]);
    }

    #[test]
    fn pparamset_pops_name_then_value() {
        let mut sink = BufferSink::new();
        let stack = run_with(
            "pparamSet",
            vec![
                StackValue::Integer(155),
                StackValue::Str("counter".to_string()),
            ],
            &mut sink,
        );
        assert!(stack.is_empty());
        assert_eq!(sink.persistent_parameter("counter"), Some("155".to_string()));
    }

    #[test]
    fn tparamdel_removes_the_binding() {
        let mut sink = BufferSink::new();
        sink.set_temporary_parameter("n", "1");
        run_with("tparamDel", vec![StackValue::Str("n".to_string())], &mut sink);
        assert_eq!(sink.temporary_parameter("n"), None);
    }

    #[test]
    fn unknown_name_pushes_a_diagnostic() {
        let stack = run("bogus", vec![]);
        assert_eq!(
            stack,
            vec![StackValue::Str("unknown function name: bogus".to_string())]
        );
    }

    #[test]
    fn underflow_is_an_error() {
        let mut sink = BufferSink::new();
        let mut stack = vec![];
        assert_eq!(
            apply("sin", &mut stack, &mut sink),
            Err(EvalError::StackUnderflow)
        );
    }

    #[test]
    fn non_numeric_argument_to_sin_fails() {
        let mut sink = BufferSink::new();
        let mut stack = vec![StackValue::Str("abc".to_string())];
        assert_eq!(
            apply("sin", &mut stack, &mut sink),
            Err(EvalError::NotNumeric {
                text: "abc".to_string()
            })
        );
    }

    #[test]
    fn stack_value_round_trips_through_value() {
        let v = StackValue::Str("12".to_string()).to_value();
        assert_eq!(v, Ok(Value::Integer(12)));
    }
}
