use std::{fmt, io};

/// Utility enum to package errors that can occur while reading / solving a query.
#[derive(Debug)]
pub enum Error {
    /// The command line could not be understood.
    Usage(String),

    /// The query was rejected by the solver.
    Query(algebrist_error::Error),

    /// The query could not be read.
    Io(io::Error),

    /// The solution could not be written as JSON.
    Json(serde_json::Error),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Query errors are printed as an `ariadne` report highlighting the input; the rest are
    /// printed as a single line.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Query(err) => err.report_to_stderr("input", input),
            err => eprintln!("error: {}", err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::Query(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "{}", err),
            Self::Json(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<algebrist_error::Error> for Error {
    fn from(err: algebrist_error::Error) -> Self {
        Self::Query(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
