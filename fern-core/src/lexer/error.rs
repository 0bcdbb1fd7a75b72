use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalErrorType {
    UnrecognizedByte { byte: u8 },
    UnterminatedString,
    MultipleFloatingPoints,
}

/// Lexical failure recovered from an ERROR token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub message: String,
    pub location: SrcSpan
}

impl LexicalErrorType {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            LexicalErrorType::UnrecognizedByte { byte } => (
                "unrecognized byte",
                vec![format!("Byte 0x{byte:02x} does not start any token")]
            ),
            LexicalErrorType::UnterminatedString => (
                "unterminated string",
                vec!["Add a closing `\"`".to_string()]
            ),
            LexicalErrorType::MultipleFloatingPoints => (
                "multiple decimal points in number",
                vec![]
            ),
        }
    }

    pub fn message(&self) -> String {
        match self {
            LexicalErrorType::UnrecognizedByte { byte } => format!("unrecognized byte 0x{byte:02x}"),
            other => other.details().0.to_string()
        }
    }
}
