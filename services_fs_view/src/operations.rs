//! Namespace operations
//!
//! This module defines the operations provided by the namespace service and
//! the errors they report.

use fs_view::{EntryKind, PathError, TableError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during namespace operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    /// Path resolution error
    #[error("Path error: {0}")]
    PathError(#[from] PathError),

    /// Entry table rejected the change
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// Target of the operation does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// File operation aimed at a directory
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Directory operation aimed at a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Non-recursive delete of a directory with children
    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// Write content is not enclosed in double quotes
    #[error("Malformed content: {0}")]
    ContentMalformed(String),

    /// Search found nothing
    #[error("No matches for: {0}")]
    NoMatches(String),
}

/// Flat classification of [`OperationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PathInvalid,
    NotFound,
    NotADirectory,
    NotAFile,
    AlreadyExists,
    CapacityExceeded,
    DirectoryNotEmpty,
    ContentMalformed,
    NoMatches,
}

impl OperationError {
    /// Collapses the layered error into its kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            OperationError::PathError(PathError::InvalidPath(_)) => ErrorKind::PathInvalid,
            OperationError::PathError(PathError::NotFound(_))
            | OperationError::TableError(TableError::NotFound(_))
            | OperationError::NotFound(_) => ErrorKind::NotFound,
            OperationError::PathError(PathError::NotADirectory(_))
            | OperationError::NotADirectory(_) => ErrorKind::NotADirectory,
            OperationError::TableError(TableError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
            OperationError::TableError(TableError::CapacityExceeded { .. }) => {
                ErrorKind::CapacityExceeded
            }
            OperationError::NotAFile(_) => ErrorKind::NotAFile,
            OperationError::DirectoryNotEmpty(_) => ErrorKind::DirectoryNotEmpty,
            OperationError::ContentMalformed(_) => ErrorKind::ContentMalformed,
            OperationError::NoMatches(_) => ErrorKind::NoMatches,
        }
    }
}

/// One child reported by a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedEntry {
    pub kind: EntryKind,
    pub name: String,
}

/// Namespace operations trait
///
/// Every path is absolute. Outcomes are typed; rendering them is left to the
/// caller.
pub trait NamespaceOperations {
    /// Create an empty file or directory
    ///
    /// Never replaces an existing entry.
    fn create(&mut self, path: &str, kind: EntryKind) -> Result<(), OperationError>;

    /// Read a file
    ///
    /// Returns `None` if the file was never written.
    fn read(&self, path: &str) -> Result<Option<&[u8]>, OperationError>;

    /// Overwrite a file
    ///
    /// `content` must be wrapped in double quotes; the text between the first
    /// and the last quote is stored. Returns the number of bytes stored.
    fn write(&mut self, path: &str, content: &str) -> Result<usize, OperationError>;

    /// Delete a file or an empty directory
    fn delete(&mut self, path: &str) -> Result<(), OperationError>;

    /// Delete an entry together with everything below it
    ///
    /// Returns the number of entries removed.
    fn delete_recursive(&mut self, path: &str) -> Result<usize, OperationError>;

    /// List the children of a directory, `/` being the root
    ///
    /// Children come in table order, not sorted.
    fn list(&self, path: &str) -> Result<Vec<ListedEntry>, OperationError>;

    /// Find every entry with the given name
    ///
    /// Returns absolute paths in ascending order.
    fn find_all(&self, name: &str) -> Result<Vec<String>, OperationError>;
}

/// Strips the surrounding quotes from write content
///
/// Anything after the last quote is dropped.
pub fn unquote(content: &str) -> Result<&str, OperationError> {
    let inner = content
        .strip_prefix('"')
        .ok_or_else(|| OperationError::ContentMalformed("missing opening quote".to_string()))?;
    let end = inner
        .rfind('"')
        .ok_or_else(|| OperationError::ContentMalformed("missing closing quote".to_string()))?;
    Ok(&inner[..end])
}
