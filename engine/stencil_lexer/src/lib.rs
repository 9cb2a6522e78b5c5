//! Stencil Lexer - low-level scanning building blocks.
//!
//! The Stencil grammar is mode-dependent (plain text outside tags, lexemes
//! inside), so there is no standalone token stream: the parser drives a
//! [`Cursor`] directly and uses this crate for the pieces that are mode
//! independent:
//!
//! - [`Cursor`]: a byte-position cursor over the source text,
//! - [`cook_escape`]: the single escape rule shared by plain text and string
//!   literals,
//! - [`classify`]: whitespace-delimited lexeme classification into
//!   [`stencil_ir::Token`]s.

mod classify;
mod cursor;
mod escape;

pub use classify::{classify, is_valid_name, ClassifyError};
pub use cursor::Cursor;
pub use escape::cook_escape;
