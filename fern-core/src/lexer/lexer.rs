use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token, TokenKind};
use crate::utils::prelude::SrcSpan;

/// Result of scanning a whole source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
	pub tokens: Vec<Token>,
	/// Set when a byte outside every token class was found.
	pub has_error: bool,
}

impl Lexed {
	pub fn errors(&self) -> Vec<LexicalError> {
		self.tokens.iter()
			.filter_map(|token| match token.kind {
				TokenKind::Error(error) => Some(LexicalError {
					error,
					message: token.literal.clone(),
					location: token.span
				}),
				_ => None
			})
			.collect()
	}
}

pub fn tokenize(src: &str) -> Lexed {
	let mut lexer = Lexer::new(src.bytes().enumerate().map(|(i, b)| (i as u32, b)));
	let tokens = lexer.by_ref().collect();

	Lexed {
		tokens,
		has_error: lexer.has_error()
	}
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, u8)>> {
	position: u32,
	next_position: u32,
	ch: Option<u8>,
	next_ch: Option<u8>,
	input: T,

	line: u32,
	column: u32,
	has_error: bool,
	finished: bool,
}

impl<T: Iterator<Item = (u32, u8)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,

			line: 1,
			column: 1,
			has_error: false,
			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn has_error(&self) -> bool {
		self.has_error
	}

	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();

		let ch = match self.ch {
			Some(ch) => ch,
			None => return self.token_at(TokenKind::Eof, "", self.position, self.line, self.column)
		};

		match ch {
			b'+' => self.eat_one_char(TokenKind::Plus),
			b'-' => self.eat_one_char(TokenKind::Minus),
			b'*' => self.eat_one_char(TokenKind::Asterisk),
			b'(' => self.eat_one_char(TokenKind::LParen),
			b')' => self.eat_one_char(TokenKind::RParen),
			b'[' => self.eat_one_char(TokenKind::LSBracket),
			b']' => self.eat_one_char(TokenKind::RSBracket),
			b'{' => self.eat_one_char(TokenKind::LBrace),
			b'}' => self.eat_one_char(TokenKind::RBrace),
			b';' => self.eat_one_char(TokenKind::Semicolon),
			b',' => self.eat_one_char(TokenKind::Comma),
			b'=' => self.eat_with_equals(TokenKind::Assign, TokenKind::Equal),
			b'!' => self.eat_with_equals(TokenKind::Bang, TokenKind::NotEqual),
			b'<' => self.eat_with_equals(TokenKind::LessThan, TokenKind::LessThanOrEqual),
			b'>' => self.eat_with_equals(TokenKind::GreaterThan, TokenKind::GreaterThanOrEqual),
			b'/' => match self.next_ch {
				Some(b'/') => self.lex_comment(),
				_ => self.eat_one_char(TokenKind::Slash),
			},
			b'"' => self.lex_string(),
			b'0'..=b'9' => self.lex_number(),
			b'a'..=b'z' | b'A'..=b'Z' => self.lex_ident(),
			byte => {
				let (start, line, column) = (self.position, self.line, self.column);
				self.has_error = true;
				self.next_char();

				self.error_at(LexicalErrorType::UnrecognizedByte { byte }, start, line, column)
			}
		}
	}

	fn next_char(&mut self) -> Option<u8> {
		let ch = self.ch;

		match ch {
			Some(b'\n') => {
				self.line += 1;
				self.column = 1;
			},
			Some(_) => self.column += 1,
			None => {}
		}

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
			self.next_char();
		}
	}

	fn token_at(&self, kind: TokenKind, literal: impl Into<String>, start: u32, line: u32, column: u32) -> Token {
		let end = self.position.max(start);

		Token::new(kind, literal, SrcSpan::from(start, end), line, column)
	}

	fn error_at(&self, error: LexicalErrorType, start: u32, line: u32, column: u32) -> Token {
		let message = format!("{line}:{column}: {}", error.message());

		self.token_at(TokenKind::Error(error), message, start, line, column)
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);
		self.next_char();

		self.token_at(kind, "", start, line, column)
	}

	fn eat_with_equals(&mut self, single: TokenKind, double: TokenKind) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);
		self.next_char();

		if self.ch == Some(b'=') {
			self.next_char();
			self.token_at(double, "", start, line, column)
		} else {
			self.token_at(single, "", start, line, column)
		}
	}

	fn lex_ident(&mut self) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(u8::is_ascii_alphanumeric) {
			ident.push(ch as char);
			self.next_char();
		}

		match str_to_keyword(&ident) {
			Some(keyword) => self.token_at(keyword, "", start, line, column),
			None => self.token_at(TokenKind::Ident, ident, start, line, column)
		}
	}

	fn lex_number(&mut self) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);

		let mut value = String::new();
		let mut has_period = false;
		let mut malformed = false;

		loop {
			match self.ch {
				Some(ch) if ch.is_ascii_digit() => {
					value.push(ch as char);
					self.next_char();
				},
				Some(b'.') => {
					malformed |= has_period;
					has_period = true;

					value.push('.');
					self.next_char();
				},
				_ => break
			}
		}

		if malformed {
			return self.error_at(LexicalErrorType::MultipleFloatingPoints, start, line, column);
		}

		self.token_at(TokenKind::Number, value, start, line, column)
	}

	fn lex_string(&mut self) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);

		self.next_char(); // opening quote

		let mut bytes = vec![];

		loop {
			match self.ch {
				Some(b'"') => {
					self.next_char();
					break;
				},
				Some(ch) => {
					bytes.push(ch);
					self.next_char();
				},
				None => return self.error_at(LexicalErrorType::UnterminatedString, start, line, column)
			}
		}

		let value = String::from_utf8_lossy(&bytes).into_owned();

		self.token_at(TokenKind::String, value, start, line, column)
	}

	fn lex_comment(&mut self) -> Token {
		let (start, line, column) = (self.position, self.line, self.column);

		self.next_char();
		self.next_char();

		let mut bytes = vec![];

		while let Some(ch) = self.ch.filter(|ch| *ch != b'\n') {
			bytes.push(ch);
			self.next_char();
		}

		let text = String::from_utf8_lossy(&bytes).into_owned();

		self.token_at(TokenKind::Comment, text, start, line, column)
	}
}

impl<T: Iterator<Item = (u32, u8)>> Iterator for Lexer<T> {
	type Item = Token;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if token.is(TokenKind::Eof) {
			self.finished = true;
		}

		Some(token)
	}
}
