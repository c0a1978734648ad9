use crate::grid::Dimensions;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GolError>;

/// Every failure is fatal to the run; nothing here is retried.
#[derive(Debug, Error)]
pub enum GolError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a pgm file", .path.display())]
    NotPgm { path: PathBuf },

    #[error("malformed pgm header in {}: {reason}", .path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("{} has dimensions {found}, expected {expected}", .path.display())]
    DimensionMismatch {
        path: PathBuf,
        expected: Dimensions,
        found: Dimensions,
    },

    #[error("{} has maxval {found}, expected 255", .path.display())]
    BitDepth { path: PathBuf, found: usize },

    #[error("{} holds {found} pixels, expected {expected}", .path.display())]
    TruncatedPixels {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("event receiver was dropped before the run finished")]
    EventsClosed,
}

impl GolError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
