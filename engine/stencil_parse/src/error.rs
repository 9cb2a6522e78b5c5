//! Parse error types.
//!
//! Every syntax failure carries a structured kind; the `Display` impl
//! produces the human-readable reason the caller reports. No position
//! tracking: the offending lexeme or tag name is quoted instead, which is
//! enough to diagnose templates of the size this language is used for.

use std::fmt;

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `{` not followed by `$` (whitespace permitted between).
    MissingDollar,
    /// A tag with no name and no `=`.
    MissingTagName,
    /// A named tag that is neither `for` nor `end`.
    UnknownCommand {
        /// The name as written.
        name: String,
    },
    /// A tag whose closing `$` is not followed by `}`.
    MissingTagClose,
    /// An `end` tag with no open for-loop to close.
    TooManyEndTags,
    /// End of input with for-loops still open.
    MissingEndTags {
        /// How many for-loops remained open.
        open: usize,
    },
    /// End of input in the middle of a tag.
    UnexpectedEof,
    /// `@` followed by an invalid identifier.
    InvalidFunctionName {
        /// The offending lexeme, `@` included.
        lexeme: String,
    },
    /// A lexeme matching no token class.
    UnknownData {
        /// The offending lexeme.
        lexeme: String,
    },
    /// A for-loop tag with fewer than 3 or more than 4 elements.
    ForElementCount {
        /// How many elements the tag had.
        got: usize,
    },
    /// A for-loop whose first element is not a variable name.
    ForVariableExpected {
        /// The first element as written.
        lexeme: String,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MissingDollar => write!(f, "after `{{` must come a `$` sign"),
            ParseErrorKind::MissingTagName => {
                write!(f, "opened tag must have a name (for, end) or be an echo (=)")
            }
            ParseErrorKind::UnknownCommand { name } => write!(f, "unknown command: `{name}`"),
            ParseErrorKind::MissingTagClose => write!(f, "missing `$}}` combination"),
            ParseErrorKind::TooManyEndTags => write!(f, "too many end tags"),
            ParseErrorKind::MissingEndTags { open } => {
                write!(f, "missing {open} end tag(s) at end of input")
            }
            ParseErrorKind::UnexpectedEof => write!(f, "unexpected end of input inside a tag"),
            ParseErrorKind::InvalidFunctionName { lexeme } => {
                write!(f, "function name is not valid: `{lexeme}`")
            }
            ParseErrorKind::UnknownData { lexeme } => write!(f, "unknown data: `{lexeme}`"),
            ParseErrorKind::ForElementCount { got } => {
                write!(f, "for-loop tag takes 3 or 4 elements, got {got}")
            }
            ParseErrorKind::ForVariableExpected { lexeme } => {
                write!(f, "for-loop variable must be a variable name, got `{lexeme}`")
            }
        }
    }
}

/// A fatal parse failure. No partial tree is ever returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Structured failure category.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind) -> Self {
        ParseError { kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ParseError {}
