//! # Filesystem View
//!
//! The storage core of the in-memory namespace: the entry model, the
//! per-directory hash-chained entry table and absolute path resolution.
//!
//! ## Design
//!
//! - A directory is an [`Entry`] owning an [`EntryTable`] of its children
//! - Ownership is a strict tree; dropping a directory drops its subtree
//! - There is no parent pointer: every operation re-walks its path from the
//!   root it is handed
//! - Tables have a fixed bucket count and a hard entry limit

pub mod directory;
pub mod entry;
pub mod path;

pub use directory::{EntryTable, TableError, BUCKET_COUNT, MAX_ENTRIES};
pub use entry::{Entry, EntryKind, Payload, MAX_NAME_LEN};
pub use path::{PathError, PathResolver, MAX_DEPTH, SEPARATOR};
