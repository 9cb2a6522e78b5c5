//! Named scoped stacks for loop variables.
//!
//! Each variable name maps to an independent LIFO stack. Pushing under a
//! name shadows any outer binding of the same name; popping restores it —
//! exactly what nested for-loops reusing a variable name need, without a
//! full lexical-scope stack. Entries are created lazily on first push and
//! never removed; a name whose stack is empty counts as unbound.

use rustc_hash::FxHashMap;

use crate::errors::{unbound, EvalResult};
use crate::value::Value;

/// Map from variable name to its stack of values.
#[derive(Debug, Default)]
pub struct ValueMultistack {
    stacks: FxHashMap<String, Vec<Value>>,
}

impl ValueMultistack {
    pub fn new() -> Self {
        ValueMultistack::default()
    }

    /// Push `value` under `name`, shadowing any current binding.
    pub fn push(&mut self, name: &str, value: Value) {
        if let Some(stack) = self.stacks.get_mut(name) {
            stack.push(value);
        } else {
            self.stacks.insert(name.to_string(), vec![value]);
        }
    }

    /// Remove and return the current binding of `name`.
    pub fn pop(&mut self, name: &str) -> EvalResult<Value> {
        self.stacks
            .get_mut(name)
            .and_then(Vec::pop)
            .ok_or_else(|| unbound(name))
    }

    /// The current binding of `name`, left in place.
    pub fn peek(&self, name: &str) -> EvalResult<Value> {
        self.stacks
            .get(name)
            .and_then(|stack| stack.last())
            .copied()
            .ok_or_else(|| unbound(name))
    }

    /// Returns `true` if `name` currently has a binding.
    pub fn is_bound(&self, name: &str) -> bool {
        self.stacks.get(name).is_some_and(|stack| !stack.is_empty())
    }
}
