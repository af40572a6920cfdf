//! kanjirad's error type.

use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot read {what} at '{}'", path.display())]
    SourceUnreadable {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No {0} configured, cannot build the dictionary cache")]
    SourceMissing(&'static str),
    #[error("Malformed dictionary source: {0}")]
    MalformedSource(String),
    #[error("Dictionary import cancelled by user")]
    Cancelled,
    #[error("No kanji record at offset {offset}")]
    NotFound { offset: u64 },
    #[error("Failed to write {what}")]
    Write {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("Corrupt dictionary cache file '{}': {message}", path.display())]
    CacheCorrupt { path: PathBuf, message: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn malformed(report: eyre::Report) -> Self {
        Self::MalformedSource(format!("{report:#}"))
    }

    pub(crate) fn write(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Write { what, source }
    }
}
