//! The tree-walking executor.
//!
//! Walks a parsed document top-down: text nodes stream straight to the
//! sink, for-loops drive a named stack binding, and echo tags run a small
//! postfix machine over [`StackValue`]s. Whatever the echo machine leaves
//! on its stack is written to the sink bottom-to-top.

use std::cmp::Ordering;
use std::fmt;

use stencil_ir::{format_double, Node, Operator, Token};

use crate::builtins;
use crate::errors::{stack_underflow, EvalResult};
use crate::multistack::ValueMultistack;
use crate::sink::ExecutionSink;
use crate::value::Value;

/// An item on the echo machine's stack: a number or raw text.
///
/// Text converts to a number lazily, only when an operator or a numeric
/// function demands it; until then `"12"` and `12` are distinct items that
/// render differently.
#[derive(Clone, Debug, PartialEq)]
pub enum StackValue {
    Integer(i64),
    Double(f64),
    Str(String),
}

impl StackValue {
    /// Coerce to a number, failing on non-numeric text.
    pub fn to_value(&self) -> EvalResult<Value> {
        match self {
            StackValue::Integer(n) => Ok(Value::Integer(*n)),
            StackValue::Double(d) => Ok(Value::Double(*d)),
            StackValue::Str(s) => Value::parse_str(s),
        }
    }
}

impl From<Value> for StackValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(n) => StackValue::Integer(n),
            Value::Double(d) => StackValue::Double(d),
        }
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackValue::Integer(n) => write!(f, "{n}"),
            StackValue::Double(d) => f.write_str(&format_double(*d)),
            StackValue::Str(s) => f.write_str(s),
        }
    }
}

/// Execute `document` against `sink`.
///
/// Aborts at the first error; output already written stays written.
pub fn execute<S: ExecutionSink>(document: &Node, sink: &mut S) -> EvalResult<()> {
    Engine::new(sink).run(document)
}

/// One execution of a document: the sink plus the loop-variable stacks.
///
/// The compiled tree is never mutated, so a single parsed document may be
/// executed any number of times through fresh engines.
pub struct Engine<'a, S> {
    sink: &'a mut S,
    stacks: ValueMultistack,
}

impl<'a, S: ExecutionSink> Engine<'a, S> {
    pub fn new(sink: &'a mut S) -> Self {
        Engine {
            sink,
            stacks: ValueMultistack::new(),
        }
    }

    pub fn run(&mut self, node: &Node) -> EvalResult<()> {
        match node {
            Node::Document { children } => {
                for child in children {
                    self.run(child)?;
                }
                Ok(())
            }
            Node::Text { content } => Ok(self.sink.write(content)?),
            Node::ForLoop {
                variable,
                start,
                end,
                step,
                children,
            } => self.run_for_loop(variable, start, end, step.as_ref(), children),
            Node::Echo { tokens } => self.run_echo(tokens),
        }
    }

    /// An absent step counts by one. The variable is bound for the loop's
    /// duration only; the final pop removes the binding.
    fn run_for_loop(
        &mut self,
        variable: &str,
        start: &Token,
        end: &Token,
        step: Option<&Token>,
        children: &[Node],
    ) -> EvalResult<()> {
        let start = bound_value(start)?;
        let end = bound_value(end)?;
        let step = match step {
            Some(token) => bound_value(token)?,
            None => Value::Integer(1),
        };

        self.stacks.push(variable, start);
        while self.stacks.peek(variable)?.compare(end) != Ordering::Greater {
            for child in children {
                self.run(child)?;
            }
            let next = self.stacks.pop(variable)?.add(step)?;
            self.stacks.push(variable, next);
        }
        self.stacks.pop(variable)?;
        Ok(())
    }

    fn run_echo(&mut self, tokens: &[Token]) -> EvalResult<()> {
        let mut stack: Vec<StackValue> = Vec::new();
        for token in tokens {
            match token {
                Token::IntegerConstant(n) => stack.push(StackValue::Integer(*n)),
                Token::DoubleConstant(d) => stack.push(StackValue::Double(*d)),
                Token::StringConstant(s) => stack.push(StackValue::Str(s.clone())),
                Token::Variable(name) => stack.push(self.stacks.peek(name)?.into()),
                Token::Operator(op) => apply_operator(*op, &mut stack)?,
                Token::Function(name) => builtins::apply(name, &mut stack, self.sink)?,
            }
        }
        for item in &stack {
            self.sink.write(&item.to_string())?;
        }
        Ok(())
    }
}

/// The first pop is the right-hand operand.
fn apply_operator(op: Operator, stack: &mut Vec<StackValue>) -> EvalResult<()> {
    let rhs = stack.pop().ok_or_else(stack_underflow)?.to_value()?;
    let lhs = stack.pop().ok_or_else(stack_underflow)?.to_value()?;
    let result = match op {
        Operator::Add => lhs.add(rhs),
        Operator::Sub => lhs.sub(rhs),
        Operator::Mul => lhs.mul(rhs),
        Operator::Div => lhs.div(rhs),
    }?;
    stack.push(result.into());
    Ok(())
}

/// A loop bound as a number. Numeric constants pass through; every other
/// token is read via its canonical text, which must parse as a number. A
/// string constant's canonical text keeps its quotes, so a quoted bound
/// fails here even when the quoted content is numeric.
fn bound_value(token: &Token) -> EvalResult<Value> {
    match token {
        Token::IntegerConstant(n) => Ok(Value::Integer(*n)),
        Token::DoubleConstant(d) => Ok(Value::Double(*d)),
        other => Value::parse_str(&other.as_text()),
    }
}
