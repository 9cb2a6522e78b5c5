//! Byte-position cursor over the source text.
//!
//! The cursor reads bytes, not chars: every delimiter in the grammar is
//! ASCII, and multi-byte UTF-8 sequences contain only bytes `>= 0x80`, so a
//! byte-level scan can never stop inside a character. [`Cursor::current`]
//! returns `0x00` at end of input, which no classification predicate
//! matches, so scanning loops terminate naturally.

use memchr::memchr2;

/// Cursor over a borrowed source string.
///
/// `Copy`, so a snapshot of the scan position is a plain assignment.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at position 0.
    pub fn new(src: &'src str) -> Self {
        Cursor { src, pos: 0 }
    }

    /// The byte at the current position, or `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// The full character at the current position, if any.
    ///
    /// Only valid when the cursor sits on a character boundary, which it
    /// always does: every advance is either `advance` past an ASCII byte or
    /// `advance_char` past a whole character.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Advance past one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
        }
    }

    /// Returns `true` once the whole source has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Extract a source substring.
    ///
    /// `start..end` must lie on character boundaries; this holds for all
    /// positions recorded from the cursor, since scanning only ever stops on
    /// ASCII bytes or full-character advances.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        &self.src[start..end]
    }

    /// Advance while `pred` accepts the current byte.
    ///
    /// `pred(0)` must return `false` so the loop stops at end of input; this
    /// is true for every byte-class predicate used by the parser.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance past ASCII whitespace (including newlines).
    ///
    /// The tag grammar tolerates any whitespace between tokens and around
    /// delimiters, so newlines count here.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Advance past plain text to the next `{` or `\`, or to end of input.
    /// Returns the delimiter byte found, or `0` for end of input.
    pub fn skip_to_text_delim(&mut self) -> u8 {
        let remaining = &self.src.as_bytes()[self.pos.min(self.src.len())..];
        if let Some(offset) = memchr2(b'{', b'\\', remaining) {
            self.pos += offset;
            self.current()
        } else {
            self.pos = self.src.len();
            0
        }
    }
}
