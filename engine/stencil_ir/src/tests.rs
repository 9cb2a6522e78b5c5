use pretty_assertions::assert_eq;

use crate::{format_double, Node, Operator, Token};

// === Token canonical forms ===

#[test]
fn operator_as_text() {
    assert_eq!(Token::Operator(Operator::Add).as_text(), "+");
    assert_eq!(Token::Operator(Operator::Sub).as_text(), "-");
    assert_eq!(Token::Operator(Operator::Mul).as_text(), "*");
    assert_eq!(Token::Operator(Operator::Div).as_text(), "/");
}

#[test]
fn operator_from_symbol_is_exact() {
    assert_eq!(Operator::from_symbol("+"), Some(Operator::Add));
    assert_eq!(Operator::from_symbol("++"), None);
    assert_eq!(Operator::from_symbol(""), None);
}

#[test]
fn function_as_text_restores_at_sign() {
    assert_eq!(Token::Function("sin".to_string()).as_text(), "@sin");
}

#[test]
fn variable_as_text_is_name() {
    assert_eq!(Token::Variable("counter_2".to_string()).as_text(), "counter_2");
}

#[test]
fn integer_as_text() {
    assert_eq!(Token::IntegerConstant(-42).as_text(), "-42");
}

#[test]
fn double_as_text_keeps_fraction_marker() {
    assert_eq!(Token::DoubleConstant(5.0).as_text(), "5.0");
    assert_eq!(Token::DoubleConstant(-1.75).as_text(), "-1.75");
}

#[test]
fn string_as_text_rewraps_quotes_without_reescaping() {
    let token = Token::StringConstant("a\rb".to_string());
    assert_eq!(token.as_text(), "\"a\rb\"");
}

// === Double rendering ===

#[test]
fn format_double_integral_value() {
    assert_eq!(format_double(3.0), "3.0");
    assert_eq!(format_double(-0.0), "-0.0");
}

#[test]
fn format_double_nonfinite_values() {
    assert_eq!(format_double(f64::INFINITY), "Infinity");
    assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_double(f64::NAN), "NaN");
}

// === Node canonical forms ===

#[test]
fn text_node_is_verbatim() {
    let node = Node::Text {
        content: "plain text\r\n".to_string(),
    };
    assert_eq!(node.as_text(), "plain text\r\n");
}

#[test]
fn echo_node_separates_tokens_with_single_space() {
    let node = Node::Echo {
        tokens: vec![
            Token::Variable("i".to_string()),
            Token::IntegerConstant(2),
            Token::Operator(Operator::Mul),
        ],
    };
    assert_eq!(node.as_text(), "{$= i 2 * $}");
}

#[test]
fn for_loop_without_step() {
    let node = Node::ForLoop {
        variable: "i".to_string(),
        start: Token::IntegerConstant(1),
        end: Token::IntegerConstant(3),
        step: None,
        children: vec![Node::Text {
            content: "x".to_string(),
        }],
    };
    assert_eq!(node.as_text(), "{$ FOR i 1 3 $}x{$END$}");
}

#[test]
fn for_loop_with_step_and_nested_children() {
    let inner = Node::Echo {
        tokens: vec![Token::Variable("i".to_string())],
    };
    let node = Node::ForLoop {
        variable: "i".to_string(),
        start: Token::IntegerConstant(0),
        end: Token::IntegerConstant(10),
        step: Some(Token::IntegerConstant(2)),
        children: vec![inner],
    };
    assert_eq!(node.as_text(), "{$ FOR i 0 10 2 $}{$= i $}{$END$}");
}

#[test]
fn document_concatenates_children() {
    let document = Node::Document {
        children: vec![
            Node::Text {
                content: "a".to_string(),
            },
            Node::Echo {
                tokens: vec![Token::IntegerConstant(1)],
            },
            Node::Text {
                content: "b".to_string(),
            },
        ],
    };
    assert_eq!(document.as_text(), "a{$= 1 $}b");
}
