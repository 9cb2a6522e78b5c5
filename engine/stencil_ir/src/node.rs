//! Tree nodes of a compiled template.
//!
//! The tree is owned top-down: each internal node holds its children in
//! document order and nothing holds a back-reference, so plain ownership is
//! sufficient (no arena, no cycles).

use crate::token::Token;

/// A node of the compiled template tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// The root. Always exactly one per parse.
    Document {
        /// Child nodes in document order.
        children: Vec<Node>,
    },
    /// A run of plain text, escapes already resolved.
    Text {
        /// The text to emit verbatim.
        content: String,
    },
    /// A bounded for-loop: `{$ FOR var start end [step] $} ... {$END$}`.
    ///
    /// `variable` is the name of the loop's `Variable` token; storing the
    /// name directly makes the "variable token is always the `Variable`
    /// variant" invariant hold by construction.
    ForLoop {
        /// Loop variable name (the scope key during execution).
        variable: String,
        /// Start expression token.
        start: Token,
        /// End expression token.
        end: Token,
        /// Optional step expression token; absent means a step of one.
        step: Option<Token>,
        /// Repeated child nodes in document order.
        children: Vec<Node>,
    },
    /// An echo tag: `{$= token token ... $}`.
    Echo {
        /// Expression tokens in source order.
        tokens: Vec<Token>,
    },
}

impl Node {
    /// Canonical textual form of this node and its subtree.
    ///
    /// Whitespace between tag tokens is normalized to a single space;
    /// re-parsing the result yields a tree that executes identically.
    pub fn as_text(&self) -> String {
        match self {
            Node::Document { children } => children.iter().map(Node::as_text).collect(),
            Node::Text { content } => content.clone(),
            Node::ForLoop {
                variable,
                start,
                end,
                step,
                children,
            } => {
                let mut text = format!("{{$ FOR {variable} {} {}", start.as_text(), end.as_text());
                if let Some(step) = step {
                    text.push(' ');
                    text.push_str(&step.as_text());
                }
                text.push_str(" $}");
                for child in children {
                    text.push_str(&child.as_text());
                }
                text.push_str("{$END$}");
                text
            }
            Node::Echo { tokens } => {
                let mut text = String::from("{$= ");
                for token in tokens {
                    text.push_str(&token.as_text());
                    text.push(' ');
                }
                text.push_str("$}");
                text
            }
        }
    }
}
