//! # Namespace Service
//!
//! This service provides the filesystem-like operations of the in-memory
//! namespace on top of the `fs_view` storage core.
//!
//! ## Operations
//!
//! - `create(path, kind)`: Create an empty file or directory
//! - `read(path)`: Read file contents
//! - `write(path, content)`: Replace file contents with quoted text
//! - `delete(path)`: Remove a file or an empty directory
//! - `delete_recursive(path)`: Remove an entry and its whole subtree
//! - `list(path)`: List directory children in table order
//! - `find_all(name)`: Sorted absolute paths of every entry with a name

pub mod operations;
pub mod search;
pub mod service;

pub use operations::{unquote, ErrorKind, ListedEntry, NamespaceOperations, OperationError};
pub use search::SearchEngine;
pub use service::NamespaceService;
