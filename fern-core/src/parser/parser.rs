use crate::{lexer::prelude::{tokenize, Token, TokenKind}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Program, Statement};

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub errors: Vec<ParseError>,
    pub comments: Vec<SrcSpan>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub next_token: Token,
    pub comments: Vec<SrcSpan>,
    pub errors: Vec<ParseError>,

    eof: Token,
    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(input: T) -> Self {
        let eof = Token::new(TokenKind::Eof, "", SrcSpan::default(), 1, 1);

        let mut parser = Self {
            current_token: eof.clone(),
            next_token: eof.clone(),
            comments: vec![],
            errors: vec![],

            eof,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Consumes the current token and returns it.
    pub fn next_token(&mut self) -> Token {
        let next = loop {
            match self.tokens.next() {
                Some(token) if token.is(TokenKind::Comment) => {
                    self.comments.push(token.span)
                },
                Some(token) => {
                    if token.is(TokenKind::Eof) {
                        self.eof = token.clone();
                    }

                    break token;
                },
                None => break self.eof.clone()
            }
        };

        let next_token = std::mem::replace(&mut self.next_token, next);

        std::mem::replace(&mut self.current_token, next_token)
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token.kind)
    }

    pub fn parse(mut self) -> Parsed {
        let program = match Program::parse(&mut self, None) {
            Ok(program) => program,
            Err(err) => {
                self.errors.push(err);
                Program::default()
            }
        };

        tracing::debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        Parsed {
            program,
            errors: self.errors,
            comments: self.comments,
        }
    }

    /// Parses statements until `until` or the end of input, recording
    /// failed statements instead of returning them.
    pub fn parse_statements(&mut self, until: TokenKind) -> Vec<Statement> {
        let mut statements = vec![];

        while !self.current_token.is(until) && !self.current_token.is(TokenKind::Eof) {
            match Statement::parse(self, None) {
                Ok(statement) => statements.push(statement),
                Err(err) => {
                    tracing::trace!(%err, "recovering from parse error");

                    self.errors.push(err);
                    self.synchronize(until);
                }
            }
        }

        statements
    }

    fn synchronize(&mut self, until: TokenKind) {
        loop {
            match self.current_token.kind {
                TokenKind::Eof => return,
                kind if kind == until => return,
                TokenKind::Semicolon => {
                    self.step();
                    return;
                },
                _ => self.step()
            }
        }
    }

    /// Comma separated expressions up to `close`, which is consumed.
    pub fn parse_expression_list(&mut self, close: TokenKind) -> Result<(Vec<Expression>, u32), ParseError> {
        let mut expressions = vec![];

        if self.current_token.is(close) {
            let end = self.next_token().span.end;
            return Ok((expressions, end));
        }

        expressions.push(Expression::parse(self, None)?);

        while self.current_token.is(TokenKind::Comma) {
            self.step();
            expressions.push(Expression::parse(self, None)?);
        }

        let (_, end) = self.expect_one(close)?;

        Ok((expressions, end))
    }

    pub fn expect_one(&mut self, kind: TokenKind) -> Result<(u32, u32), ParseError> {
        if self.current_token.is(kind) {
            let token = self.next_token();
            return Ok((token.span.start, token.span.end));
        }

        Err(self.unexpected(vec![format!("`{}`", kind.as_literal())]))
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.kind {
            TokenKind::Ident => {
                let token = self.next_token();
                Ok((token.span.start, token.literal, token.span.end))
            },
            TokenKind::Eof | TokenKind::Error(_) => Err(self.unexpected(vec!["an identifier".into()])),
            _ => Err(ParseError::at(ParseErrorType::ExpectedIdent, &self.current_token))
        }
    }

    /// Error for the current token when it does not fit.
    pub fn unexpected(&self, expected: Vec<String>) -> ParseError {
        let token = &self.current_token;

        let error = match token.kind {
            TokenKind::Eof => ParseErrorType::UnexpectedEof,
            TokenKind::Error(error) => ParseErrorType::LexError {
                error,
                message: token.literal.clone()
            },
            kind => ParseErrorType::UnexpectedToken {
                token: kind,
                lexeme: token.lexeme().to_string(),
                expected
            }
        };

        ParseError::at(error, token)
    }

    pub fn no_prefix_error(&self) -> ParseError {
        let token = &self.current_token;

        match token.kind {
            TokenKind::Eof | TokenKind::Error(_) => self.unexpected(vec![]),
            kind => ParseError::at(
                ParseErrorType::NoPrefixParser {
                    token: kind,
                    lexeme: token.lexeme().to_string()
                },
                token
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Assign,
    Logical,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl From<&TokenKind> for Precedence {
    fn from(value: &TokenKind) -> Self {
        match value {
            TokenKind::Equal | TokenKind::NotEqual => Self::Assign,
            TokenKind::And | TokenKind::Or => Self::Logical,
            TokenKind::LessThan | TokenKind::GreaterThan |
            TokenKind::LessThanOrEqual | TokenKind::GreaterThanOrEqual => Self::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Self::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Self::Product,
            TokenKind::LParen => Self::Call,
            TokenKind::LSBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_program(src: &str) -> Parsed {
    let lexed = tokenize(src);
    let parser = Parser::new(lexed.tokens.into_iter());

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, token: &Token) -> Result<T, ParseError> {
    Err(ParseError::at(error, token))
}
