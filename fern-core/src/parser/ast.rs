use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::prelude::{Token, TokenKind},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items.iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(separator)
}

// program -> { <statement> }
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_token.span.start;

        let statements = parser.parse_statements(TokenKind::Eof);

        let end = parser.current_token.span.end.max(start);

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join(&self.statements, "\n"))
    }
}

// statement -> <var> | <while> | <if> | <return> | <block> | <function> | <expression_statement>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Var(VarStatement),
    Block(BlockStatement),
    If(IfStatement),
    While(WhileStatement),
    Return(ReturnStatement),
    Function(FunctionStatement),
}

impl<T: Iterator<Item = Token>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let res = match parser.current_token.kind {
            TokenKind::Var => Self::Var(VarStatement::parse(parser, None)?),
            TokenKind::Ident if parser.next_token.is(TokenKind::Assign) => {
                Self::Var(VarStatement::parse(parser, None)?)
            },
            TokenKind::While => Self::While(WhileStatement::parse(parser, None)?),
            TokenKind::If => Self::If(IfStatement::parse(parser, None)?),
            TokenKind::Return => Self::Return(ReturnStatement::parse(parser, None)?),
            TokenKind::LBrace => Self::Block(BlockStatement::parse(parser, None)?),
            TokenKind::Fun => Self::Function(FunctionStatement::parse(parser, None)?),
            _ => Self::Expression(ExpressionStatement::parse(parser, None)?)
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(statement) => write!(f, "{statement}"),
            Self::Var(statement) => write!(f, "{statement}"),
            Self::Block(statement) => write!(f, "{statement}"),
            Self::If(statement) => write!(f, "{statement}"),
            Self::While(statement) => write!(f, "{statement}"),
            Self::Return(statement) => write!(f, "{statement}"),
            Self::Function(statement) => write!(f, "{statement}"),
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Expression(statement) => statement.location,
            Self::Var(statement) => statement.location,
            Self::Block(statement) => statement.location,
            Self::If(statement) => statement.location,
            Self::While(statement) => statement.location,
            Self::Return(statement) => statement.location,
            Self::Function(statement) => statement.location,
        }
    }
}

// expression_statement -> <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ExpressionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let expression = Expression::parse(parser, None)?;
        let mut location = expression.location();

        if parser.current_token.is(TokenKind::Semicolon) {
            location.end = parser.next_token().span.end;
        }

        Ok(Self {
            expression,
            location
        })
    }
}

impl Display for ExpressionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};", self.expression)
    }
}

// var -> [var] <identifier> ( ; | = <expression> ; )
#[derive(Debug, Clone, PartialEq)]
pub struct VarStatement {
    pub identifier: Identifier,
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for VarStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = parser.current_token.span.start;

        if parser.current_token.is(TokenKind::Var) {
            parser.step();
        }

        let identifier = Identifier::from(parser.expect_ident()?);

        let (value, end) = match parser.current_token.kind {
            TokenKind::Semicolon => (None, parser.next_token().span.end),
            TokenKind::Assign => {
                parser.step();

                let value = Expression::parse(parser, None)?;
                let (_, end) = parser.expect_one(TokenKind::Semicolon)?;

                (Some(value), end)
            },
            TokenKind::Eof | TokenKind::Error(_) => return Err(parser.unexpected(vec![])),
            _ => return parse_error(ParseErrorType::ExpectedAssignOrSemicolon, &parser.current_token)
        };

        Ok(Self {
            identifier,
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for VarStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "var {} = {value};", self.identifier),
            None => write!(f, "var {};", self.identifier)
        }
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for BlockStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(TokenKind::LBrace)?;

        let statements = parser.parse_statements(TokenKind::RBrace);

        if parser.current_token.is(TokenKind::RBrace) {
            end = parser.next_token().span.end;
        } else if let Some(last) = statements.last() {
            end = last.location().end;
        }

        Ok(Self {
            statements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ {} }}", join(&self.statements, " "))
    }
}

// if -> if ( <expression> ) <block> [else <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub body: BlockStatement,
    pub alternative: Option<BlockStatement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for IfStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(TokenKind::If)?;

        parser.expect_one(TokenKind::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(TokenKind::RParen)?;

        let body = BlockStatement::parse(parser, None)?;
        let mut end = body.location.end;

        let alternative = if parser.current_token.is(TokenKind::Else) {
            parser.step();

            let alternative = BlockStatement::parse(parser, None)?;
            end = alternative.location.end;

            Some(alternative)
        } else {
            None
        };

        Ok(Self {
            condition,
            body,
            alternative,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.body)?;

        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }

        Ok(())
    }
}

// while -> while ( <expression> ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: BlockStatement,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for WhileStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(TokenKind::While)?;

        parser.expect_one(TokenKind::LParen)?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(TokenKind::RParen)?;

        let body = BlockStatement::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            condition,
            body,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while ({}) {}", self.condition, self.body)
    }
}

// return -> return [<expression>] [;]
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ReturnStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, mut end) = parser.expect_one(TokenKind::Return)?;

        let value = match parser.current_token.kind {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => {
                let value = Expression::parse(parser, None)?;
                end = value.location().end;

                Some(value)
            }
        };

        if parser.current_token.is(TokenKind::Semicolon) {
            end = parser.next_token().span.end;
        }

        Ok(Self {
            value,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {value};"),
            None => write!(f, "return;")
        }
    }
}

// function -> fun <identifier> ( [<identifier> {, <identifier>}] ) <block>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for FunctionStatement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(TokenKind::Fun)?;

        let name = Identifier::from(parser.expect_ident()?);

        parser.expect_one(TokenKind::LParen)?;

        let mut parameters = vec![];

        if parser.current_token.is(TokenKind::RParen) {
            parser.step();
        } else {
            loop {
                parameters.push(Identifier::from(parser.expect_ident()?));

                if parser.current_token.is(TokenKind::Comma) {
                    parser.step();
                    continue;
                }

                parser.expect_one(TokenKind::RParen)?;
                break;
            }
        }

        let body = BlockStatement::parse(parser, None)?;
        let end = body.location.end;

        Ok(Self {
            name,
            parameters,
            body: Rc::new(body),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for FunctionStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fun {}({}) {}", self.name, join(&self.parameters, ", "), self.body)
    }
}

// expression -> <identifier> | <primitive> | <array> | <prefix> | <infix> | <index> | <call> | ( <expression> )
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Primitive(Primitive),
    Array(ArrayLiteral),
    Prefix(Prefix),
    Infix(Infix),
    Index(Index),
    Call(Call),
}

impl<T: Iterator<Item = Token>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut expr = match parser.current_token.kind {
            TokenKind::Ident => Self::Identifier(Identifier::from(parser.expect_ident()?)),
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil => Self::Primitive(Primitive::parse(parser, None)?),
            TokenKind::Bang | TokenKind::Minus => Self::Prefix(Prefix::parse(parser, None)?),
            TokenKind::LSBracket => Self::Array(ArrayLiteral::parse(parser, None)?),
            TokenKind::LParen => {
                parser.step();

                let expression = Expression::parse(parser, None)?;

                parser.expect_one(TokenKind::RParen)?;

                expression
            },
            _ => return Err(parser.no_prefix_error())
        };

        let precedence = precedence.unwrap_or(Precedence::Lowest);

        while !parser.current_token.is(TokenKind::Semicolon)
            && precedence < parser.current_precedence()
        {
            expr = match parser.current_token.kind {
                TokenKind::LParen => Self::Call(Call::parse(parser, expr, None)?),
                TokenKind::LSBracket => Self::Index(Index::parse(parser, expr, None)?),
                kind if kind.is_infix_operator() => Self::Infix(Infix::parse(parser, expr, None)?),
                _ => break
            }
        }

        Ok(expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Array(array) => write!(f, "{array}"),
            Self::Prefix(prefix) => write!(f, "{prefix}"),
            Self::Infix(infix) => write!(f, "{infix}"),
            Self::Index(index) => write!(f, "{index}"),
            Self::Call(call) => write!(f, "{call}"),
        }
    }
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Identifier(ident) => ident.location,
            Self::Primitive(primitive) => primitive.location(),
            Self::Array(array) => array.location,
            Self::Prefix(prefix) => prefix.location,
            Self::Infix(infix) => infix.location,
            Self::Index(index) => index.location,
            Self::Call(call) => call.location,
        }
    }
}

// identifier -> <letter> { <letter> | <digit> }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

// primitive -> <int> | <float> | <bool> | <string> | nil
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    },
    Float {
        value: f64,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    },
    String {
        value: String,
        location: SrcSpan
    },
    Nil {
        location: SrcSpan
    }
}

impl<T: Iterator<Item = Token>> Parse<T> for Primitive {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let token = parser.next_token();
        let location = token.span;

        match token.kind {
            TokenKind::Number if token.literal.contains('.') => match token.literal.parse::<f64>() {
                Ok(value) => Ok(Self::Float { value, location }),
                Err(_) => parse_error(
                    ParseErrorType::InvalidNumber { literal: token.literal.clone() },
                    &token
                )
            },
            TokenKind::Number => match token.literal.parse::<i64>() {
                Ok(value) => Ok(Self::Int { value, location }),
                Err(_) => parse_error(
                    ParseErrorType::InvalidNumber { literal: token.literal.clone() },
                    &token
                )
            },
            TokenKind::String => Ok(Self::String { value: token.literal, location }),
            TokenKind::True => Ok(Self::Bool { value: true, location }),
            TokenKind::False => Ok(Self::Bool { value: false, location }),
            TokenKind::Nil => Ok(Self::Nil { location }),
            kind => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: kind,
                    lexeme: token.lexeme().to_string(),
                    expected: vec!["a literal".to_string()]
                },
                &token
            )
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => {
                let literal = value.to_string();

                if literal.contains('.') {
                    write!(f, "{literal}")
                } else {
                    write!(f, "{literal}.0")
                }
            },
            Self::Bool { value, .. } => write!(f, "{value}"),
            Self::String { value, .. } => write!(f, "\"{value}\""),
            Self::Nil { .. } => write!(f, "nil"),
        }
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Float { location, .. }
            | Self::Bool { location, .. }
            | Self::String { location, .. }
            | Self::Nil { location } => *location
        }
    }
}

// array -> [ [<expression> {, <expression>}] ]
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for ArrayLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(TokenKind::LSBracket)?;

        let (elements, end) = parser.parse_expression_list(TokenKind::RSBracket)?;

        Ok(Self {
            elements,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", join(&self.elements, ", "))
    }
}

// prefix -> ( - | ! ) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: TokenKind,
    pub expression: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> Parse<T> for Prefix {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let token = parser.next_token();

        let expression = Expression::parse(parser, Some(Precedence::Prefix))?;
        let end = expression.location().end;

        Ok(Self {
            operator: token.kind,
            expression: Box::new(expression),
            location: SrcSpan { start: token.span.start, end }
        })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.as_literal(), self.expression)
    }
}

// infix -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: TokenKind,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Infix {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let operator = parser.next_token().kind;

        let right = Expression::parse(parser, Some(precedence))?;

        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.as_literal(), self.right)
    }
}

// index -> <expression> [ <expression> ]
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Index {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(TokenKind::LSBracket)?;

        let index = Expression::parse(parser, None)?;

        let (_, end) = parser.expect_one(TokenKind::RSBracket)?;

        let start = left.location().start;

        Ok(Self {
            left: Box::new(left),
            index: Box::new(index),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

// call -> <identifier> ( [<expression> {, <expression>}] )
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: Identifier,
    pub arguments: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Call {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let function = match left {
            Expression::Identifier(ident) => ident,
            _ => return parse_error(ParseErrorType::InvalidCallee, &parser.current_token)
        };

        parser.expect_one(TokenKind::LParen)?;

        let (arguments, end) = parser.parse_expression_list(TokenKind::RParen)?;

        let start = function.location.start;

        Ok(Self {
            function,
            arguments,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.function, join(&self.arguments, ", "))
    }
}
