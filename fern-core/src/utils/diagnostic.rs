use std::path::PathBuf;

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle},
    files::SimpleFiles,
    term::Config
};
use termcolor::Buffer;

use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, src_len: usize) -> CodespanLabel<usize> {
        let start = (self.span.start as usize).min(src_len);
        let end = (self.span.end as usize).clamp(start, src_len);

        let label = CodespanLabel::new(LabelStyle::Primary, file_id, start..end);

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

/// An error report, optionally pointing into a source file.
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write")
        }
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();

        let file_id = files.add(location.path.to_string_lossy().into_owned(), location.src);

        let label = location.label.to_codespan_label(file_id, location.src.len());

        let diagnostic = CodespanDiagnostic::error()
            .with_message(&self.title)
            .with_labels(vec![label]);

        codespan_reporting::term::emit(buf, &Config::default(), &files, &diagnostic)
            .expect("write_diagnostic");
    }

    pub fn write_title(&self, buf: &mut Buffer) {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))
            .expect("write_title_color1");
        write!(buf, "error").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color2");
        write!(buf, ": {}\n\n", self.title).expect("write_title_title");

        buf.set_color(&ColorSpec::new())
            .expect("write_title_reset");
    }
}
