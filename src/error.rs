//! Error types for the todocx library.

use std::io;
use thiserror::Error;

/// Result type alias for todocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input format could not be determined.
    #[error("Unknown input format")]
    UnknownFormat,

    /// The input file has an extension outside the accepted set.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input file exceeds the configured size limit.
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Error reading or interpreting a PDF document.
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error packing the Word document.
    #[error("DOCX encode error: {0}")]
    DocxEncode(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),

    /// Remote conversion requested without an API credential.
    #[error("No API credential configured")]
    MissingCredential,

    /// Remote conversion API failure.
    #[error("Conversion API error: {0}")]
    Api(String),

    /// An operation was attempted before an input was accepted.
    #[error("No input selected")]
    NoInput,
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown input format");

        let err = Error::UnsupportedInput(".epub".to_string());
        assert_eq!(err.to_string(), "Unsupported input: .epub");

        let err = Error::FileTooLarge {
            size: 20,
            limit: 10,
        };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
