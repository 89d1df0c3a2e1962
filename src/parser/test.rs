use super::{tokenize_string, Locatable, Location, ParserState, Span, Token, TokenType, Tokenizer};
use crate::error::LexError;

fn tokens_match(input: &str, expected: &[(TokenType, &str)]) {
    let result = tokenize_string(input);
    let expected: Vec<Token> = expected
        .iter()
        .map(|(typ, lexeme)| Token::new(*typ, *lexeme))
        .collect();
    assert!(
        matches!(result, Ok(ref tokens) if *tokens == expected),
        "\nFailed to tokenize \"{}\":\nexpected {:?}\ngot {:?}\n",
        input,
        expected,
        result
    );
}

fn assert_invalid_character(input: &str, chr: char, line: usize, column: usize) {
    let result = tokenize_string(input);
    assert_eq!(
        result,
        Err(LexError::InvalidCharacter(chr, Location::new(line, column)))
    );
}

#[test]
fn test_operators_and_parentheses() {
    use TokenType::*;
    tokens_match(
        "(1+2)*3/4-5",
        &[
            (LPAR, "("),
            (NUMBER, "1"),
            (OPERATOR, "+"),
            (NUMBER, "2"),
            (RPAR, ")"),
            (OPERATOR, "*"),
            (NUMBER, "3"),
            (OPERATOR, "/"),
            (NUMBER, "4"),
            (OPERATOR, "-"),
            (NUMBER, "5"),
        ],
    );
}

#[test]
fn test_numbers() {
    use TokenType::*;
    tokens_match("42", &[(NUMBER, "42")]);
    tokens_match("1.5", &[(NUMBER, "1.5")]);
    tokens_match(".5", &[(NUMBER, ".5")]);
    tokens_match("12.", &[(NUMBER, "12.")]);
    // Shape is only checked when evaluating.
    tokens_match("1.2.3", &[(NUMBER, "1.2.3")]);
    tokens_match("..", &[(NUMBER, "..")]);
    tokens_match("10-2", &[(NUMBER, "10"), (OPERATOR, "-"), (NUMBER, "2")]);
}

#[test]
fn test_whitespace_is_skipped() {
    use TokenType::*;
    let expected = [
        (NUMBER, "1"),
        (OPERATOR, "+"),
        (NUMBER, "2"),
        (OPERATOR, "*"),
        (NUMBER, "3"),
    ];
    tokens_match("1+2*3", &expected);
    tokens_match("1 + 2 * 3", &expected);
    tokens_match("\t1\u{a0}+ 2\r*3  ", &expected);
    tokens_match("1 +\n2\n* 3\n", &expected);
}

#[test]
fn test_whitespace_inside_number() {
    use TokenType::*;
    tokens_match("1 2", &[(NUMBER, "12")]);
    tokens_match("1 2+3", &[(NUMBER, "12"), (OPERATOR, "+"), (NUMBER, "3")]);
    tokens_match("1 . 5", &[(NUMBER, "1.5")]);
    tokens_match(
        "(1) 2",
        &[(LPAR, "("), (NUMBER, "1"), (RPAR, ")"), (NUMBER, "2")],
    );

    let tokens = tokenize_string(" 3 4\n5").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].typ(), NUMBER);
    assert_eq!(tokens[0].lexeme(), "345");
    assert_eq!(tokens[0].span(), Span::new(0, 1, 1, 1));
}

#[test]
fn test_empty_input() {
    tokens_match("", &[]);
    tokens_match("   \n\t ", &[]);
}

#[test]
fn test_invalid_character() {
    assert_invalid_character("1+a", 'a', 0, 2);
    assert_invalid_character("2^3", '^', 0, 1);
    assert_invalid_character("1 + 2\n3 % 4", '%', 1, 2);
    assert_invalid_character("1e5", 'e', 0, 1);
    assert_invalid_character("ü", 'ü', 0, 0);
}

#[test]
fn test_invalid_character_message() {
    let err = tokenize_string("3 # 4").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid character in expression: '#' at line 1, column 3"
    );
}

#[test]
fn test_spans() {
    let tokens = tokenize_string("12 + (3.5)").unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span()).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 0, 0, 2),
            Span::new(0, 3, 0, 4),
            Span::new(0, 5, 0, 6),
            Span::new(0, 6, 0, 9),
            Span::new(0, 9, 0, 10),
        ]
    );
}

#[test]
fn test_token_equality_ignores_span() {
    let tokens = tokenize_string("  7").unwrap();
    assert_eq!(tokens[0].span(), Span::new(0, 2, 0, 3));
    assert_eq!(tokens[0], Token::new(TokenType::NUMBER, "7"));
    assert_ne!(tokens[0], Token::new(TokenType::NUMBER, "8"));
    assert_eq!(tokens[0].to_string(), "NUMBER('7')");
}

#[test]
fn test_continuation() {
    let mut tokenizer = Tokenizer::new();
    let pending = ParserState::ContinuationNeeded;
    assert_eq!(tokenizer.tokenize(["(1 +"]), pending);
    assert_eq!(tokenizer.tokenize(["(2"]), pending);
    assert_eq!(tokenizer.tokenize(["* 3))"]), ParserState::Ok);
    let tokens = tokenizer.finalize();
    assert_eq!(tokens.len(), 9);
    assert_eq!(tokens[4].span(), Span::new(1, 1, 1, 2));
    assert_eq!(tokens[6].span().start, Location::new(2, 2));
}

#[test]
fn test_excess_closing_parenthesis_is_not_a_lex_error() {
    let mut tokenizer = Tokenizer::new();
    assert_eq!(tokenizer.tokenize(["1+2)"]), ParserState::Ok);
    assert_eq!(tokenizer.finalize().len(), 4);
}

#[test]
fn test_error_state() {
    let mut tokenizer = Tokenizer::new();
    assert_eq!(
        tokenizer.tokenize(["(1", "+ x"]),
        ParserState::Error(LexError::InvalidCharacter('x', Location::new(1, 2)))
    );
}

#[test]
fn test_unclosed_parenthesis_still_tokenizes() {
    use TokenType::*;
    tokens_match(
        "(1+2",
        &[(LPAR, "("), (NUMBER, "1"), (OPERATOR, "+"), (NUMBER, "2")],
    );
}
