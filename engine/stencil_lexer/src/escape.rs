//! Escape cooking.
//!
//! One rule covers both plain text and string literals: `\r`, `\n` and `\t`
//! resolve to their control characters; a backslash before any other
//! character consumes both and emits nothing. There is deliberately no way
//! to produce a literal backslash or `{` — the rule is a quirk of the
//! grammar, not a general escape mechanism.

/// Resolve the character following a backslash.
///
/// Returns the replacement character, or `None` when the escape pair is
/// dropped entirely.
pub fn cook_escape(escaped: char) -> Option<char> {
    match escaped {
        'r' => Some('\r'),
        'n' => Some('\n'),
        't' => Some('\t'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::cook_escape;

    #[test]
    fn known_escapes_resolve() {
        assert_eq!(cook_escape('r'), Some('\r'));
        assert_eq!(cook_escape('n'), Some('\n'));
        assert_eq!(cook_escape('t'), Some('\t'));
    }

    #[test]
    fn unknown_escapes_are_dropped() {
        assert_eq!(cook_escape('q'), None);
        assert_eq!(cook_escape('\\'), None);
        assert_eq!(cook_escape('{'), None);
        assert_eq!(cook_escape('\u{1F600}'), None);
    }
}
