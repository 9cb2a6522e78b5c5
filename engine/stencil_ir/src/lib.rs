//! Stencil IR - token and node models for the Stencil template language.
//!
//! A compiled template is a tree of [`Node`]s whose leaves reference
//! [`Token`]s. The tree is produced once by the parser, is immutable, and may
//! be executed any number of times; execution never mutates it.
//!
//! Every token and node has a canonical textual form ([`Token::as_text`],
//! [`Node::as_text`]) that re-serializes to syntax the parser accepts. The
//! canonical form normalizes whitespace between tag tokens to a single space;
//! everything else round-trips exactly.

mod node;
mod token;

pub use node::Node;
pub use token::{format_double, Operator, Token};

#[cfg(test)]
mod tests;
