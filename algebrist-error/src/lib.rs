//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the regions of source it points at.

// lets the `ErrorKind` derive refer to `algebrist_error` from within this crate's own tests
extern crate self as algebrist_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `#[derive(ErrorKind)]` from the `algebrist-attrs` crate.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the kind as [`Any`], so that callers can check which kind of error occurred.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error, without any source context.
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

    /// Whether the error is fatal. A fatal error stops speculative parsing from trying the next
    /// alternative.
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

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the given input.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        let report = self.build_report(src_id);
        let _ = report.eprint((src_id, Source::from(input)));
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use algebrist_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown variable `{}`", name),
        labels = ["this variable"],
        help = "only `x` is allowed here",
    )]
    struct UnknownVariable {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "the query is empty")]
    struct Empty;

    /// Renders the report of the given error without color codes.
    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn report_contains_message_label_and_help() {
        let err = Error::new(vec![4..5], UnknownVariable { name: "y".to_string() });
        let report = render(&err, "2x + y = 3");

        assert!(report.contains("unknown variable `y`"));
        assert!(report.contains("this variable"));
        assert!(report.contains("only `x` is allowed here"));
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(Vec::new(), Empty);
        let report = render(&err, "");
        assert!(report.contains("the query is empty"));
    }

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![0..1], UnknownVariable { name: "q".to_string() });
        assert_eq!(err.to_string(), "unknown variable `q`");
        assert!(!err.fatal);
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new_fatal(Vec::new(), Empty);
        assert!(err.fatal);
        assert!(err.is::<Empty>());
        assert!(!err.is::<UnknownVariable>());
        assert_eq!(err.downcast_ref::<Empty>(), Some(&Empty));
    }
}
