//! Error types
//!
//! Defines the closed set of error kinds the storage core can produce.

use std::fmt;
use std::io;
use std::path::Path;

/// Storage module errors
///
/// Every filesystem failure leaving the storage layer maps to exactly one
/// of these variants. `PathTraversal`, `FileNotFound`, and `NotAFile` are
/// caller-fault conditions; `Io` covers everything else (permissions, disk
/// full) and is never shown to clients verbatim.
#[derive(Debug)]
pub enum StorageError {
    PathTraversal(String),
    FileNotFound(String),
    NotAFile(String),
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
            StorageError::FileNotFound(p) => write!(f, "File not found: {}", p),
            StorageError::NotAFile(p) => write!(f, "Not a regular file: {}", p),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

impl StorageError {
    /// Classifies an I/O failure from an act call so that a check-then-act
    /// race still surfaces as the error the up-front check would have
    /// produced.
    pub fn from_io(error: io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => StorageError::FileNotFound(path.display().to_string()),
            io::ErrorKind::IsADirectory => StorageError::NotAFile(path.display().to_string()),
            _ => StorageError::Io(error),
        }
    }
}
