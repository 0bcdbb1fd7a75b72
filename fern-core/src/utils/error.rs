use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        errors: Vec<LexicalError>
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("IO operation failed on {path}: {err}")]
    StdIo {
        path: PathBuf,
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, errors } => errors.iter()
                .map(|error| {
                    let (label, extra) = error.error.details();

                    Diagnostic {
                        title: "Lexical error".into(),
                        text: extra.join("\n"),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label.to_string()),
                                span: error.location,
                            },
                        }),
                    }
                })
                .collect(),
            Error::Parse { path, src, errors } => errors.iter()
                .map(|error| {
                    let (label, extra) = error.details();

                    // EOF tokens sit one past the input
                    let span = if error.error == ParseErrorType::UnexpectedEof {
                        SrcSpan::from(src.len() as u32, src.len() as u32)
                    } else {
                        error.span
                    };

                    Diagnostic {
                        title: "Syntax error".into(),
                        text: extra.join("\n"),
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label.to_string()),
                                span,
                            },
                        }),
                    }
                })
                .collect(),
            Error::StdIo { path, err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{}: {err}", path.display()),
                    location: None,
                }]
            }
        }
    }
}
