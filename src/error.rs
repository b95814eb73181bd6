//! Error types for the docxtract library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the ZIP archive or one of its entries.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The mandatory main document part is missing from the package.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
