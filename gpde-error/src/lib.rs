//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Every error kind in the workspace is a small struct deriving [`ErrorKind`] through
//! `gpde-attrs`. Kinds can be reported on their own (library users usually only want the
//! [`ErrorKind::message`]), or wrapped in an [`Error`] that remembers which regions of a kernel
//! script caused them, so that they can be rendered with [`ariadne`].

// lets the `ErrorKind` derive refer to this crate by name in our own tests
extern crate self as gpde_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// Whether the error is fatal. Parsers stop backtracking when they encounter a fatal error.
    pub fatal: bool,
}

impl Error {
    /// Creates a new non-fatal error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: false }
    }

    /// Creates a new fatal error with the given spans and kind.
    pub fn new_fatal(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), fatal: true }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the offending regions of `input`.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        let report = self.build_report(src_id);
        if report.eprint((src_id, Source::from(input))).is_err() {
            eprintln!("error: {}", self.kind.message());
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use gpde_attrs::ErrorKind;
    use super::*;

    /// A simple error used to check the generated report.
    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not a coordinate", self.name),
        labels = ["this symbol"],
        help = "declare it with `time(...)` or use it inside a point",
    )]
    struct NotCoordinate {
        name: String,
    }

    /// Renders the report of an error into a string, without color codes.
    fn render(error: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        error.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let error = Error::new(vec![0..2], NotCoordinate { name: "xi".to_string() });
        assert_eq!(error.to_string(), "`xi` is not a coordinate");
        assert!(!error.fatal);
    }

    #[test]
    fn report_contains_label_and_help() {
        let error = Error::new_fatal(vec![6..8], NotCoordinate { name: "xi".to_string() });
        let rendered = render(&error, "dx(u, xi)");
        assert!(error.fatal);
        assert!(rendered.contains("`xi` is not a coordinate"));
        assert!(rendered.contains("this symbol"));
        assert!(rendered.contains("declare it with `time(...)`"));
    }
}
