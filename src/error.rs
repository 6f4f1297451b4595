//! Error types for the pagepack library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagepack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a document into a bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// The source file does not exist.
    #[error("Input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive was closed but the output file is not present.
    #[error("Archive was not written to {}", .0.display())]
    ArchiveFinalize(PathBuf),

    /// Error writing or reading a ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),
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

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
