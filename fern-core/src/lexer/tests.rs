use pretty_assertions::assert_eq;

use super::prelude::{tokenize, LexicalErrorType, Lexer, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).tokens.into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_operators_and_delimiters() {
    let input = "+ - * / ! ( ) [ ] { } ; , = == != < > <= >=";

    assert_eq!(kinds(input), vec![
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Asterisk,
        TokenKind::Slash,
        TokenKind::Bang,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LSBracket,
        TokenKind::RSBracket,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Semicolon,
        TokenKind::Comma,
        TokenKind::Assign,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::LessThan,
        TokenKind::GreaterThan,
        TokenKind::LessThanOrEqual,
        TokenKind::GreaterThanOrEqual,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_two_char_operators_without_spaces() {
    assert_eq!(kinds("a<=b!c"), vec![
        TokenKind::Ident,
        TokenKind::LessThanOrEqual,
        TokenKind::Ident,
        TokenKind::Bang,
        TokenKind::Ident,
        TokenKind::Eof,
    ]);

    assert_eq!(kinds("==="), vec![TokenKind::Equal, TokenKind::Assign, TokenKind::Eof]);
}

#[test]
fn test_keywords() {
    let input = "var fun nil if else for while return and or true false string int bool byte float";

    let tokens = kinds(input);

    assert_eq!(tokens.len(), 18);
    assert!(tokens[..17].iter().all(|kind| kind.is_reserved_word()));
    assert_eq!(tokens[1], TokenKind::Fun);
    assert_eq!(tokens[16], TokenKind::FloatType);
}

#[test]
fn test_identifiers() {
    let lexed = tokenize("foo bar42 funny Var");

    let idents = lexed.tokens.iter()
        .filter(|token| token.is(TokenKind::Ident))
        .map(|token| token.literal.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(idents, vec!["foo", "bar42", "funny", "Var"]);
}

#[test]
fn test_numbers() {
    let lexed = tokenize("10 1.5 0.25 7.");

    let numbers = lexed.tokens.iter()
        .filter(|token| token.is(TokenKind::Number))
        .map(|token| token.literal.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(numbers, vec!["10", "1.5", "0.25", "7."]);
    assert!(!lexed.has_error);
}

#[test]
fn test_digit_first_splits_number_and_identifier() {
    let lexed = tokenize("12ab");

    assert_eq!(lexed.tokens[0].kind, TokenKind::Number);
    assert_eq!(lexed.tokens[0].literal, "12");
    assert_eq!(lexed.tokens[1].kind, TokenKind::Ident);
    assert_eq!(lexed.tokens[1].literal, "ab");
}

#[test]
fn test_invalid_numbers() {
    let lexed = tokenize("1.2.3 4");

    assert_eq!(
        lexed.tokens[0].kind,
        TokenKind::Error(LexicalErrorType::MultipleFloatingPoints)
    );
    assert_eq!(lexed.tokens[0].literal, "1:1: multiple decimal points in number");
    assert_eq!(lexed.tokens[1].kind, TokenKind::Number);
    assert_eq!(lexed.tokens[1].literal, "4");
}

#[test]
fn test_strings() {
    let lexed = tokenize(r#""hello world" "" "two
lines""#);

    let strings = lexed.tokens.iter()
        .filter(|token| token.is(TokenKind::String))
        .map(|token| token.literal.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(strings, vec!["hello world", "", "two\nlines"]);
}

#[test]
fn test_unterminated_string() {
    let lexed = tokenize("var a = \"abc");

    let last = &lexed.tokens[lexed.tokens.len() - 2];

    assert_eq!(last.kind, TokenKind::Error(LexicalErrorType::UnterminatedString));
    assert_eq!(last.literal, "1:9: unterminated string");
    assert_eq!(lexed.tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
    assert!(!lexed.has_error);
}

#[test]
fn test_comments() {
    let lexed = tokenize("1 // one\n2");

    assert_eq!(
        lexed.tokens.iter().map(|token| token.kind).collect::<Vec<TokenKind>>(),
        vec![TokenKind::Number, TokenKind::Comment, TokenKind::Number, TokenKind::Eof]
    );
    assert_eq!(lexed.tokens[1].literal, " one");
    assert_eq!(lexed.tokens[2].line, 2);
}

#[test]
fn test_unrecognized_bytes() {
    let lexed = tokenize("a # é");

    let errors = lexed.errors();

    assert!(lexed.has_error);
    // `é` is two bytes in UTF-8
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].error, LexicalErrorType::UnrecognizedByte { byte: b'#' });
    assert_eq!(errors[0].message, "1:3: unrecognized byte 0x23");
}

#[test]
fn test_positions() {
    let lexed = tokenize("var x = 1;\n  x + 2;");

    let plus = lexed.tokens.iter()
        .find(|token| token.is(TokenKind::Plus))
        .expect("plus token");

    assert_eq!((plus.line, plus.column), (2, 5));
    assert_eq!((plus.span.start, plus.span.end), (15, 16));
}

#[test]
fn test_single_eof() {
    let mut lexer = Lexer::new("".bytes().enumerate().map(|(i, b)| (i as u32, b)));

    assert_eq!(lexer.next().map(|token| token.kind), Some(TokenKind::Eof));
    assert_eq!(lexer.next(), None);
}
