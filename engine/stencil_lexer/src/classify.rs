//! Lexeme classification.
//!
//! A whitespace-delimited lexeme inside an echo or for-loop tag is turned
//! into a [`Token`] by trying, in order: operator, `@`function, variable,
//! integer constant, double constant, string constant. The order matters:
//! `-` alone is an operator while `-5` is an integer, and `inf` is a
//! variable, never a float.

use std::fmt;

use stencil_ir::{Operator, Token};

/// Why a lexeme failed classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// `@` followed by something that is not a valid identifier.
    InvalidFunctionName {
        /// The offending lexeme, `@` included.
        lexeme: String,
    },
    /// The lexeme matches no token class at all.
    UnknownData {
        /// The offending lexeme.
        lexeme: String,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::InvalidFunctionName { lexeme } => {
                write!(f, "function name is not valid: `{lexeme}`")
            }
            ClassifyError::UnknownData { lexeme } => write!(f, "unknown data: `{lexeme}`"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Returns `true` if `name` is a valid identifier: an ASCII letter followed
/// by letters, digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Classify one lexeme into a [`Token`].
///
/// String lexemes arrive with their surrounding quotes and with escapes
/// already resolved by the scanner; classification strips the quotes.
pub fn classify(lexeme: &str) -> Result<Token, ClassifyError> {
    if let Some(op) = Operator::from_symbol(lexeme) {
        return Ok(Token::Operator(op));
    }
    if let Some(name) = lexeme.strip_prefix('@') {
        if is_valid_name(name) {
            return Ok(Token::Function(name.to_string()));
        }
        return Err(ClassifyError::InvalidFunctionName {
            lexeme: lexeme.to_string(),
        });
    }
    if is_valid_name(lexeme) {
        return Ok(Token::Variable(lexeme.to_string()));
    }
    if let Ok(value) = lexeme.parse::<i64>() {
        return Ok(Token::IntegerConstant(value));
    }
    if let Ok(value) = lexeme.parse::<f64>() {
        return Ok(Token::DoubleConstant(value));
    }
    if lexeme.len() >= 2 && lexeme.starts_with('"') && lexeme.ends_with('"') {
        return Ok(Token::StringConstant(lexeme[1..lexeme.len() - 1].to_string()));
    }
    Err(ClassifyError::UnknownData {
        lexeme: lexeme.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{classify, is_valid_name, ClassifyError};
    use pretty_assertions::assert_eq;
    use stencil_ir::{Operator, Token};

    // === Precedence ===

    #[test]
    fn bare_minus_is_an_operator() {
        assert_eq!(classify("-"), Ok(Token::Operator(Operator::Sub)));
    }

    #[test]
    fn minus_five_is_an_integer() {
        assert_eq!(classify("-5"), Ok(Token::IntegerConstant(-5)));
    }

    #[test]
    fn identifier_beats_number_parsing() {
        // `inf` and `nan` would parse as floats; identifiers win.
        assert_eq!(classify("inf"), Ok(Token::Variable("inf".to_string())));
        assert_eq!(classify("nan"), Ok(Token::Variable("nan".to_string())));
    }

    #[test]
    fn integer_beats_double() {
        assert_eq!(classify("7"), Ok(Token::IntegerConstant(7)));
        assert_eq!(classify("7.5"), Ok(Token::DoubleConstant(7.5)));
        assert_eq!(classify("-3.25"), Ok(Token::DoubleConstant(-3.25)));
    }

    // === Functions ===

    #[test]
    fn at_prefix_makes_a_function() {
        assert_eq!(classify("@sin"), Ok(Token::Function("sin".to_string())));
        assert_eq!(
            classify("@decfmt"),
            Ok(Token::Function("decfmt".to_string()))
        );
    }

    #[test]
    fn bad_function_name_is_rejected() {
        assert_eq!(
            classify("@2x"),
            Err(ClassifyError::InvalidFunctionName {
                lexeme: "@2x".to_string()
            })
        );
        assert_eq!(
            classify("@"),
            Err(ClassifyError::InvalidFunctionName {
                lexeme: "@".to_string()
            })
        );
    }

    // === Variables ===

    #[test]
    fn identifier_shapes() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("counter_2"));
        assert!(!is_valid_name("2counter"));
        assert!(!is_valid_name("_x"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a-b"));
    }

    // === Strings ===

    #[test]
    fn quoted_lexeme_is_a_string_constant() {
        assert_eq!(
            classify("\"hello\""),
            Ok(Token::StringConstant("hello".to_string()))
        );
        assert_eq!(classify("\"\""), Ok(Token::StringConstant(String::new())));
    }

    #[test]
    fn lone_quote_is_unknown_data() {
        assert_eq!(
            classify("\""),
            Err(ClassifyError::UnknownData {
                lexeme: "\"".to_string()
            })
        );
    }

    #[test]
    fn unterminated_string_is_unknown_data() {
        assert_eq!(
            classify("\"abc"),
            Err(ClassifyError::UnknownData {
                lexeme: "\"abc".to_string()
            })
        );
    }

    #[test]
    fn garbage_is_unknown_data() {
        assert_eq!(
            classify("1..2"),
            Err(ClassifyError::UnknownData {
                lexeme: "1..2".to_string()
            })
        );
    }

    // === Property tests ===

    mod properties {
        use super::{classify, Token};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_i64_text_classifies_back(value in any::<i64>()) {
                prop_assert_eq!(
                    classify(&value.to_string()),
                    Ok(Token::IntegerConstant(value))
                );
            }

            #[test]
            fn identifier_like_lexemes_are_variables(
                first in "[a-zA-Z]",
                rest in "[a-zA-Z0-9_]{0,12}",
            ) {
                let name = format!("{first}{rest}");
                prop_assert_eq!(classify(&name), Ok(Token::Variable(name.clone())));
            }

            #[test]
            fn classification_never_panics(lexeme in "\\PC{0,24}") {
                let _ = classify(&lexeme);
            }
        }
    }
}
