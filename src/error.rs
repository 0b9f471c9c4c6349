//! Error type shared by the range normalizers, the file planner, the record stream
//! and the downloader.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A range or month argument was mis-shaped. Raised before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No monthly files matched the request.
    #[error("no files found at {} corresponding to date range {}", data_dir.display(), describe_range(date_range))]
    NotFound {
        data_dir: PathBuf,
        date_range: Option<(String, String)>,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON line {line} in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("download of {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

fn describe_range(range: &Option<(String, String)>) -> String {
    match range {
        Some((start, end)) => format!("[{start}, {end})"),
        None => "(all)".to_string(),
    }
}
