//! Error types for marktex library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for marktex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while translating or typesetting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A table block whose rows cannot be reconciled to one column layout.
    #[error("Malformed table at line {line}: {reason}")]
    MalformedTable {
        /// 1-based line number of the offending row
        line: usize,
        /// What is wrong with the table
        reason: String,
    },

    /// An image or source file referenced by the document does not exist.
    #[error("Unresolved inclusion `{reference}`: {} does not exist", path.display())]
    UnresolvedInclusion {
        /// The reference as written in the document
        reference: String,
        /// The resolved path that was looked up
        path: PathBuf,
    },

    /// No template is registered under the requested name.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// The external typesetting engine failed.
    #[error("Typesetting error: {0}")]
    Typeset(String),

    /// Error while producing an output representation.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a malformed table error.
    pub fn malformed_table(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this error is specific to one document's content, as opposed
    /// to an environment failure.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedTable { .. } | Error::UnresolvedInclusion { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::malformed_table(7, "row has 2 cells, expected 3");
        assert_eq!(
            err.to_string(),
            "Malformed table at line 7: row has 2 cells, expected 3"
        );

        let err = Error::UnresolvedInclusion {
            reference: "cat.png".to_string(),
            path: PathBuf::from("/slides/cat.png"),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved inclusion `cat.png`: /slides/cat.png does not exist"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_document_error());
    }

    #[test]
    fn test_document_errors() {
        assert!(Error::malformed_table(1, "x").is_document_error());
        assert!(!Error::UnknownTemplate("poster".into()).is_document_error());
    }
}
