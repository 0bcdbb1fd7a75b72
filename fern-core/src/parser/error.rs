use std::fmt::Display;

use crate::{lexer::prelude::{LexicalErrorType, Token, TokenKind}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedAssignOrSemicolon,
    UnexpectedEof,
    UnexpectedToken {
        token: TokenKind,
        lexeme: String,
        expected: Vec<String>,
    },
    NoPrefixParser {
        token: TokenKind,
        lexeme: String,
    },
    InvalidCallee,
    InvalidNumber { literal: String },
    LexError {
        error: LexicalErrorType,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    /// Error located at `token`.
    pub fn at(error: ParseErrorType, token: &Token) -> Self {
        Self {
            error,
            span: token.span,
            line: token.line,
            column: token.column
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("expected identifier", vec![]),
            ParseErrorType::ExpectedAssignOrSemicolon => ("expected `=` or `;`", vec![]),
            ParseErrorType::UnexpectedEof => ("unexpected end of input", vec![]),
            ParseErrorType::UnexpectedToken { token, lexeme, expected } => {
                let found = match token {
                    TokenKind::Number => format!("the number `{lexeme}`"),
                    TokenKind::String => format!("the string \"{lexeme}\""),
                    TokenKind::Ident => format!("the identifier `{lexeme}`"),
                    _ if token.is_reserved_word() => format!("the keyword `{lexeme}`"),
                    _ => format!("`{lexeme}`")
                };

                let messages = std::iter::once(format!("found {found}, expected one of:"))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("unexpected token", messages)
            },
            ParseErrorType::NoPrefixParser { lexeme, .. } => (
                "expected an expression",
                vec![format!("no prefix parse function for `{lexeme}` found")]
            ),
            ParseErrorType::InvalidCallee => (
                "invalid function identifier",
                vec!["only a name can be called".to_string()]
            ),
            ParseErrorType::InvalidNumber { literal } => (
                "invalid number literal",
                vec![format!("could not parse `{literal}` as integer or float")]
            ),
            ParseErrorType::LexError { error, .. } => error.details(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let ParseErrorType::LexError { message, .. } = &self.error {
            return write!(f, "{message}");
        }

        let (label, extra) = self.details();

        write!(f, "{}:{}: {label}", self.line, self.column)?;

        if !extra.is_empty() {
            write!(f, " ({})", extra.join(" "))?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
