//! The character-level state machine.
//!
//! One linear pass over the input. Outside tags the parser accumulates plain
//! text (resolving escapes); `{` switches to tag mode, where lexemes are
//! scanned and classified until an unescaped `$` closes the tag. Nesting is
//! tracked with an explicit frame stack, so parsing never recurses: the
//! document frame is always at the bottom, each `for` tag pushes a frame and
//! each `end` tag pops one back into its parent's children.

use stencil_ir::{Node, Token};
use stencil_lexer::{classify, cook_escape, ClassifyError, Cursor};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};

/// An open node on the frame stack.
struct Frame {
    header: FrameHeader,
    children: Vec<Node>,
}

enum FrameHeader {
    Document,
    ForLoop {
        variable: String,
        start: Token,
        end: Token,
        step: Option<Token>,
    },
}

impl Frame {
    fn document() -> Self {
        Frame {
            header: FrameHeader::Document,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> Node {
        match self.header {
            FrameHeader::Document => Node::Document {
                children: self.children,
            },
            FrameHeader::ForLoop {
                variable,
                start,
                end,
                step,
            } => Node::ForLoop {
                variable,
                start,
                end,
                step,
                children: self.children,
            },
        }
    }
}

pub(crate) struct Parser<'src> {
    cursor: Cursor<'src>,
    frames: Vec<Frame>,
    /// Plain text accumulated since the last flush.
    text: String,
    /// Set when an unescaped `$` inside a string lexeme already closed the
    /// tag; the next lexeme request reports the close instead of scanning.
    pending_close: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Parser {
            cursor: Cursor::new(src),
            frames: vec![Frame::document()],
            text: String::new(),
            pending_close: false,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Node, ParseError> {
        loop {
            let start = self.cursor.pos();
            let delim = self.cursor.skip_to_text_delim();
            let run = self.cursor.slice(start, self.cursor.pos());
            self.text.push_str(run);

            match delim {
                0 => break,
                b'\\' => self.scan_text_escape(),
                _ => {
                    // `{` — a tag begins.
                    self.cursor.advance();
                    self.flush_text();
                    self.parse_tag()?;
                }
            }
        }
        self.flush_text();

        if self.frames.len() != 1 {
            return Err(self.err(ParseErrorKind::MissingEndTags {
                open: self.frames.len() - 1,
            }));
        }
        match self.frames.pop() {
            Some(root) => Ok(root.into_node()),
            None => unreachable!("document frame always present"),
        }
    }

    /// Resolve one `\X` pair in text mode. A trailing lone backslash at end
    /// of input is dropped, like any unrecognized escape.
    fn scan_text_escape(&mut self) {
        self.cursor.advance();
        if let Some(escaped) = self.cursor.current_char() {
            if let Some(cooked) = cook_escape(escaped) {
                self.text.push(cooked);
            }
            self.cursor.advance_char();
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let content = std::mem::take(&mut self.text);
            self.top_children().push(Node::Text { content });
        }
    }

    /// Parse one tag; the opening `{` is already consumed.
    fn parse_tag(&mut self) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        match self.cursor.current() {
            0 => return Err(self.err(ParseErrorKind::UnexpectedEof)),
            b'$' => self.cursor.advance(),
            _ => return Err(self.err(ParseErrorKind::MissingDollar)),
        }

        self.cursor.eat_whitespace();
        match self.cursor.current() {
            0 => Err(self.err(ParseErrorKind::UnexpectedEof)),
            b'=' => {
                self.cursor.advance();
                self.parse_echo_tag()
            }
            b if b.is_ascii_alphabetic() => {
                let start = self.cursor.pos();
                self.cursor.eat_while(|b| b.is_ascii_alphabetic());
                let name = self.cursor.slice(start, self.cursor.pos());
                if name.eq_ignore_ascii_case("for") {
                    self.parse_for_tag()
                } else if name.eq_ignore_ascii_case("end") {
                    self.close_for_frame()?;
                    self.expect_dollar_and_brace()
                } else {
                    let name = name.to_string();
                    Err(self.err(ParseErrorKind::UnknownCommand { name }))
                }
            }
            _ => Err(self.err(ParseErrorKind::MissingTagName)),
        }
    }

    fn parse_echo_tag(&mut self) -> Result<(), ParseError> {
        let mut tokens = Vec::new();
        while let Some(lexeme) = self.next_tag_lexeme()? {
            tokens.push(self.classify_lexeme(&lexeme)?);
        }
        self.expect_close_brace()?;
        trace!(tokens = tokens.len(), "echo tag");
        self.top_children().push(Node::Echo { tokens });
        Ok(())
    }

    fn parse_for_tag(&mut self) -> Result<(), ParseError> {
        let mut elements = Vec::new();
        while let Some(lexeme) = self.next_tag_lexeme()? {
            elements.push(lexeme);
        }
        self.expect_close_brace()?;

        let mut iter = elements.iter();
        let (Some(first), Some(second), Some(third)) = (iter.next(), iter.next(), iter.next())
        else {
            return Err(self.err(ParseErrorKind::ForElementCount {
                got: elements.len(),
            }));
        };
        let fourth = iter.next();
        if iter.next().is_some() {
            return Err(self.err(ParseErrorKind::ForElementCount {
                got: elements.len(),
            }));
        }

        let variable = match self.classify_lexeme(first)? {
            Token::Variable(name) => name,
            _ => {
                return Err(self.err(ParseErrorKind::ForVariableExpected {
                    lexeme: first.clone(),
                }))
            }
        };
        let start = self.classify_lexeme(second)?;
        let end = self.classify_lexeme(third)?;
        let step = match fourth {
            Some(lexeme) => Some(self.classify_lexeme(lexeme)?),
            None => None,
        };

        trace!(variable = %variable, "for tag opened");
        self.frames.push(Frame {
            header: FrameHeader::ForLoop {
                variable,
                start,
                end,
                step,
            },
            children: Vec::new(),
        });
        Ok(())
    }

    /// Pop the innermost open for-loop into its parent's children.
    fn close_for_frame(&mut self) -> Result<(), ParseError> {
        if self.frames.len() == 1 {
            return Err(self.err(ParseErrorKind::TooManyEndTags));
        }
        if let Some(frame) = self.frames.pop() {
            trace!("for tag closed");
            self.top_children().push(frame.into_node());
        }
        Ok(())
    }

    /// Scan the next whitespace-delimited lexeme inside a tag.
    ///
    /// Returns `None` when the tag's closing `$` was consumed instead.
    /// A `$` also terminates a lexeme in progress; the pending-close flag
    /// makes the following call report the close.
    fn next_tag_lexeme(&mut self) -> Result<Option<String>, ParseError> {
        if self.pending_close {
            self.pending_close = false;
            return Ok(None);
        }
        self.cursor.eat_whitespace();
        match self.cursor.current() {
            0 => Err(self.err(ParseErrorKind::UnexpectedEof)),
            b'$' => {
                self.cursor.advance();
                Ok(None)
            }
            b'"' => self.scan_string_lexeme().map(Some),
            _ => {
                let start = self.cursor.pos();
                self.cursor
                    .eat_while(|b| b != 0 && b != b'$' && !b.is_ascii_whitespace());
                Ok(Some(self.cursor.slice(start, self.cursor.pos()).to_string()))
            }
        }
    }

    /// Scan a string lexeme as one unit: quotes kept, escapes cooked, raw
    /// control characters permitted inside. An unescaped `$` still closes
    /// the tag, leaving the unterminated lexeme to fail classification —
    /// string literals cannot contain a dollar sign.
    fn scan_string_lexeme(&mut self) -> Result<String, ParseError> {
        let mut lexeme = String::from('"');
        self.cursor.advance();
        loop {
            let start = self.cursor.pos();
            self.cursor
                .eat_while(|b| b != 0 && b != b'"' && b != b'$' && b != b'\\');
            let run = self.cursor.slice(start, self.cursor.pos());
            lexeme.push_str(run);

            match self.cursor.current() {
                0 => return Err(self.err(ParseErrorKind::UnexpectedEof)),
                b'"' => {
                    lexeme.push('"');
                    self.cursor.advance();
                    break;
                }
                b'$' => {
                    self.cursor.advance();
                    self.pending_close = true;
                    break;
                }
                _ => {
                    // Backslash.
                    self.cursor.advance();
                    match self.cursor.current_char() {
                        None => return Err(self.err(ParseErrorKind::UnexpectedEof)),
                        Some(escaped) => {
                            if let Some(cooked) = cook_escape(escaped) {
                                lexeme.push(cooked);
                            }
                            self.cursor.advance_char();
                        }
                    }
                }
            }
        }
        Ok(lexeme)
    }

    fn classify_lexeme(&self, lexeme: &str) -> Result<Token, ParseError> {
        classify(lexeme).map_err(|e| match e {
            ClassifyError::InvalidFunctionName { lexeme } => {
                self.err(ParseErrorKind::InvalidFunctionName { lexeme })
            }
            ClassifyError::UnknownData { lexeme } => {
                self.err(ParseErrorKind::UnknownData { lexeme })
            }
        })
    }

    /// Expect `$` then `}` (whitespace tolerated), for the `end` tag whose
    /// closing `$` has not been consumed yet.
    fn expect_dollar_and_brace(&mut self) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        match self.cursor.current() {
            0 => return Err(self.err(ParseErrorKind::UnexpectedEof)),
            b'$' => self.cursor.advance(),
            _ => return Err(self.err(ParseErrorKind::MissingTagClose)),
        }
        self.expect_close_brace()
    }

    /// Expect `}` after a consumed closing `$` (whitespace tolerated).
    fn expect_close_brace(&mut self) -> Result<(), ParseError> {
        self.cursor.eat_whitespace();
        match self.cursor.current() {
            0 => Err(self.err(ParseErrorKind::UnexpectedEof)),
            b'}' => {
                self.cursor.advance();
                Ok(())
            }
            _ => Err(self.err(ParseErrorKind::MissingTagClose)),
        }
    }

    fn top_children(&mut self) -> &mut Vec<Node> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.children,
            None => unreachable!("document frame always present"),
        }
    }

    #[allow(clippy::unused_self)]
    fn err(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind)
    }
}
