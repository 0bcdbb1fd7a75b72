use std::fmt::Display;

use crate::utils::prelude::SrcSpan;
use super::error::LexicalErrorType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literal classes
    Ident,
    Number,
    String,
    // // line comment
    Comment,

    // Operators
    Plus, // +
    Minus, // -
    Asterisk, // *
    Slash, // /
    Bang, // !
    Assign, // =
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    GreaterThan, // >
    LessThanOrEqual, // <=
    GreaterThanOrEqual, // >=

    // Delimiters
    LParen, // (
    RParen, // )
    LSBracket, // [
    RSBracket, // ]
    LBrace, // {
    RBrace, // }
    Semicolon, // ;
    Comma, // ,

    // Keywords
    Var,
    Fun,
    Nil,
    If,
    Else,
    For,
    While,
    Return,
    And,
    Or,
    True,
    False,

    // Type keywords, reserved
    StringType,
    IntType,
    BoolType,
    ByteType,
    FloatType,

    Error(LexicalErrorType),
    Eof,
}

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
    Some(match word {
        "var" => TokenKind::Var,
        "fun" => TokenKind::Fun,
        "nil" => TokenKind::Nil,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "return" => TokenKind::Return,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "true" => TokenKind::True,
        "false" => TokenKind::False,

        "string" => TokenKind::StringType,
        "int" => TokenKind::IntType,
        "bool" => TokenKind::BoolType,
        "byte" => TokenKind::ByteType,
        "float" => TokenKind::FloatType,

        _ => return None
    })
}

impl TokenKind {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
            | TokenKind::Fun
            | TokenKind::Nil
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::For
            | TokenKind::While
            | TokenKind::Return
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::True
            | TokenKind::False
            | TokenKind::StringType
            | TokenKind::IntType
            | TokenKind::BoolType
            | TokenKind::ByteType
            | TokenKind::FloatType
        )
    }

    pub fn is_infix_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::LessThan
            | TokenKind::GreaterThan
            | TokenKind::LessThanOrEqual
            | TokenKind::GreaterThanOrEqual
            | TokenKind::And
            | TokenKind::Or
        )
    }

    /// Source spelling of fixed tokens, or the class name for literal tokens.
    pub fn as_literal(&self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Comment => "COMMENT",

            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Assign => "=",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessThanOrEqual => "<=",
            TokenKind::GreaterThanOrEqual => ">=",

            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LSBracket => "[",
            TokenKind::RSBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",

            TokenKind::Var => "var",
            TokenKind::Fun => "fun",
            TokenKind::Nil => "nil",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",

            TokenKind::StringType => "string",
            TokenKind::IntType => "int",
            TokenKind::BoolType => "bool",
            TokenKind::ByteType => "byte",
            TokenKind::FloatType => "float",

            TokenKind::Error(_) => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier spelling, number digits, string contents, comment text
    /// or the error message. Empty for fixed tokens.
    pub literal: String,
    pub span: SrcSpan,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: SrcSpan, line: u32, column: u32) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
            line,
            column
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// Text of the token as written, used in error messages.
    pub fn lexeme(&self) -> &str {
        match self.kind {
            TokenKind::Ident
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Comment
            | TokenKind::Error(_) => &self.literal,
            kind => kind.as_literal()
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.kind)?;

        if !self.literal.is_empty() {
            write!(f, " {:?}", self.literal)?;
        }

        Ok(())
    }
}
