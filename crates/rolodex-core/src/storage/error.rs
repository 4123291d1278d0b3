//! Storage error handling
//!
//! Provides typed errors for backing-file operations with descriptive
//! messages and recovery suggestions.

use std::io;
use std::path::PathBuf;

use serde_json::error::Category;
use thiserror::Error;

/// Errors that can occur while reading or writing the contacts file
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the directory holding the contacts file
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not syntactically valid JSON
    #[error("Could not decode JSON from '{path}': {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File is valid JSON but not a list of contacts
    #[error("Unexpected contents in '{path}': {source}")]
    InvalidContents {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Contacts could not be encoded
    #[error("Failed to serialize contacts: {0}")]
    Serialize(#[source] serde_json::Error),

    /// File not found (when expected to exist)
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Create a read-side error from an I/O error with path context
    pub fn from_read(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            _ => StorageError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Create a write-side error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => StorageError::NotFound { path },
            // StorageFull is not stable everywhere, so also sniff the message
            _ if is_disk_full_error(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            _ => StorageError::WriteError {
                path,
                source: error,
            },
        }
    }

    /// Classify a decode failure of the file at `path`
    ///
    /// Broken syntax and truncation are format errors; well-formed JSON of
    /// the wrong shape is a contents error.
    pub fn from_decode(source: serde_json::Error, path: PathBuf) -> Self {
        match source.classify() {
            Category::Syntax | Category::Eof => StorageError::InvalidFormat { path, source },
            Category::Data | Category::Io => StorageError::InvalidContents { path, source },
        }
    }

    /// Whether the file was readable but not parseable
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, StorageError::InvalidFormat { .. })
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StorageError::InvalidFormat { .. } | StorageError::InvalidContents { .. } => {
                Some("Fix or remove the contacts file. The next save will overwrite it.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_classification() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::from_io(io_err, PathBuf::from("/test/contacts.json"));

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_not_found_classification() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = StorageError::from_io(io_err, PathBuf::from("/missing/contacts.tmp"));

        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_decode_syntax_error_is_parse_failure() {
        let source = serde_json::from_str::<Vec<u8>>("[1, 2").unwrap_err();
        let err = StorageError::from_decode(source, PathBuf::from("/data/contacts.json"));

        assert!(matches!(err, StorageError::InvalidFormat { .. }));
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_decode_wrong_shape_is_contents_error() {
        let source = serde_json::from_str::<Vec<u8>>(r#"{"name": "Alice"}"#).unwrap_err();
        let err = StorageError::from_decode(source, PathBuf::from("/data/contacts.json"));

        assert!(matches!(err, StorageError::InvalidContents { .. }));
        assert!(!err.is_parse_failure());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_read_error_classification() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err = StorageError::from_read(io_err, PathBuf::from("/data/contacts.json"));

        assert!(matches!(err, StorageError::ReadError { .. }));
        assert!(!err.is_parse_failure());
    }

    #[test]
    fn test_disk_full_detection() {
        let io_err = io::Error::new(io::ErrorKind::Other, "No space left on device");
        let err = StorageError::from_io(io_err, PathBuf::from("/full/disk"));

        assert!(matches!(err, StorageError::DiskFull { .. }));
        assert_eq!(
            err.recovery_suggestion(),
            Some("Free up disk space and try again.")
        );
    }

    #[test]
    fn test_invalid_format_is_parse_failure() {
        let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err = StorageError::InvalidFormat {
            path: PathBuf::from("/data/contacts.json"),
            source,
        };

        assert!(err.is_parse_failure());
        let msg = err.to_string();
        assert!(msg.contains("Could not decode JSON"));
        assert!(msg.contains("/data/contacts.json"));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::PermissionDenied {
            path: PathBuf::from("/test/file"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("/test/file"));
    }
}
