//! Tree-walking interpreter for Stencil documents.
//!
//! The entry point is [`execute`]: hand it a parsed [`Node`] tree and an
//! [`ExecutionSink`] and it renders the document, running for-loops over
//! named scoped stacks and echo tags through a postfix value machine.
//!
//! ```
//! use stencil_eval::{execute, BufferSink};
//!
//! let doc = stencil_parse::parse("{$ FOR i 1 3 $}{$= i $} {$END$}").unwrap();
//! let mut sink = BufferSink::new();
//! execute(&doc, &mut sink).unwrap();
//! assert_eq!(sink.output, "1 2 3 ");
//! ```
//!
//! [`Node`]: stencil_ir::Node

mod builtins;
mod engine;
mod errors;
mod format;
mod multistack;
mod sink;
mod value;

pub use engine::{execute, Engine, StackValue};
pub use errors::{EvalError, EvalResult};
pub use format::{format_decimal, DecimalPattern};
pub use multistack::ValueMultistack;
pub use sink::{BufferSink, ExecutionSink, SinkError};
pub use value::Value;
