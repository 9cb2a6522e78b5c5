//! Lexical atoms of tag bodies.
//!
//! Tokens are produced by lexeme classification inside `{$ ... $}` tags and
//! stored in the tree nodes that reference them. String constants hold their
//! text with escapes already resolved; `as_text` re-wraps them in quotes
//! without re-escaping, because the grammar accepts the resolved control
//! characters raw inside string literals.

use std::fmt;

/// Arithmetic operator symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// The source symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }

    /// Parse an operator from its exact source symbol.
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A lexical atom inside an echo or for-loop tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// One of `+ - * /`.
    Operator(Operator),
    /// `@name` — a built-in function reference. Holds the name without `@`.
    Function(String),
    /// A variable reference: letter, then letters/digits/underscore.
    Variable(String),
    /// A signed 64-bit integer literal.
    IntegerConstant(i64),
    /// A signed floating-point literal.
    DoubleConstant(f64),
    /// A quoted string literal with escapes already resolved.
    StringConstant(String),
}

impl Token {
    /// Canonical textual form of this token.
    ///
    /// Re-parsing the result yields an equal token, with one caveat: a string
    /// constant is emitted as its resolved content between quotes, so control
    /// characters appear raw. The tag grammar accepts them raw, preserving
    /// the round-trip property.
    pub fn as_text(&self) -> String {
        match self {
            Token::Operator(op) => op.symbol().to_string(),
            Token::Function(name) => format!("@{name}"),
            Token::Variable(name) => name.clone(),
            Token::IntegerConstant(value) => value.to_string(),
            Token::DoubleConstant(value) => format_double(*value),
            Token::StringConstant(text) => format!("\"{text}\""),
        }
    }
}

/// Render a double in the language's canonical form.
///
/// Integral values keep a trailing `.0` (`5.0`, not `5`) so a double never
/// serializes to integer syntax; non-finite values render as `Infinity`,
/// `-Infinity`, `NaN`.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut text = format!("{value}");
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}
