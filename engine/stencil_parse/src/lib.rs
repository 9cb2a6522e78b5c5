//! Stencil Parse - compiles template text into a [`stencil_ir::Node`] tree.
//!
//! The grammar: plain text interleaved with `{$ ... $}` tags. An echo tag
//! starts with `=` and holds expression tokens; a `for` tag opens a bounded
//! loop closed by a matching `end` tag. In text, `\r` `\n` `\t` resolve to
//! control characters and a backslash before anything else drops both
//! characters.
//!
//! [`parse`] either returns the document root or a [`ParseError`]; no
//! partial tree is ever produced. The returned tree is immutable and may be
//! executed any number of times.

mod error;
mod parser;

pub use error::{ParseError, ParseErrorKind};

use stencil_ir::Node;

/// Parse a template into its document tree.
pub fn parse(text: &str) -> Result<Node, ParseError> {
    parser::Parser::new(text).parse()
}
