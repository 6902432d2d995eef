// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Every failure is terminal for the current run: no partial chart, no partial export.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Connection failure, timeout, or a non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// Structured data missing or malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Bad count, unknown plot kind, bad request field.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Filesystem write failure while exporting.
    #[error("export to {} failed: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    /// Chart drawing or PNG encoding failed.
    #[error("render error: {0}")]
    Render(String),
}

/// How the caller adapters group failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network and Parse: the source page could not be used.
    SourceUnavailable,
    /// The caller sent something we refuse to run.
    BadInput,
    /// Our side failed after a good fetch.
    Internal,
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Network(_) | ScrapeError::Parse(_) => ErrorKind::SourceUnavailable,
            ScrapeError::Validation(_) => ErrorKind::BadInput,
            ScrapeError::Export { .. } | ScrapeError::Render(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ScrapeError::Export { path: path.into(), reason: reason.to_string() }
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScrapeError::Network(format!("timed out: {e}"))
        } else {
            ScrapeError::Network(e.to_string())
        }
    }
}
