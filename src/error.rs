//! Error types for docsift.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A source document listed in a collection request does not exist.
    /// Collection processing skips the document and continues.
    #[error("Source document not found: {0}")]
    MissingSource(PathBuf),

    /// Layout extraction failed for a document. Outline processing falls
    /// back to a filename-derived title with an empty heading list.
    #[error("Layout extraction failed: {0}")]
    ParseFailure(String),

    /// The document contains no text elements on any page.
    #[error("Document contains no text elements")]
    EmptyDocument,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error serializing results to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::ParseFailure(err.to_string()),
        }
    }
}
