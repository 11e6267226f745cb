//! Namespace entries
//!
//! An entry is either a file with an optional payload or a directory that
//! owns the table of its children. Ownership is strictly tree-shaped: dropping
//! a directory entry drops its whole subtree.

use crate::directory::EntryTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest entry name accepted, in bytes
pub const MAX_NAME_LEN: usize = 254;

/// Kind tag of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

impl EntryKind {
    /// Single-letter tag used in listings
    pub fn tag(self) -> char {
        match self {
            EntryKind::File => 'F',
            EntryKind::Directory => 'D',
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// What an entry holds
#[derive(Debug)]
pub enum Payload {
    /// File contents, absent until the first write
    File(Option<Vec<u8>>),
    /// Children of a directory
    Directory(EntryTable),
}

/// A named node in the namespace tree
#[derive(Debug)]
pub struct Entry {
    name: String,
    payload: Payload,
}

impl Entry {
    /// Creates an empty file entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::File(None),
        }
    }

    /// Creates an empty directory entry
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Directory(EntryTable::new()),
        }
    }

    /// Creates a fresh, empty entry of the given kind
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        match kind {
            EntryKind::File => Self::file(name),
            EntryKind::Directory => Self::directory(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        match self.payload {
            Payload::File(_) => EntryKind::File,
            Payload::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Returns the child table if this is a directory
    pub fn as_directory(&self) -> Option<&EntryTable> {
        match &self.payload {
            Payload::Directory(table) => Some(table),
            Payload::File(_) => None,
        }
    }

    /// Returns the mutable child table if this is a directory
    pub fn as_directory_mut(&mut self) -> Option<&mut EntryTable> {
        match &mut self.payload {
            Payload::Directory(table) => Some(table),
            Payload::File(_) => None,
        }
    }

    /// Returns the file contents slot if this is a file
    ///
    /// The outer `Option` tells whether the entry is a file at all, the inner
    /// one whether it has been written yet.
    pub fn file_contents(&self) -> Option<Option<&[u8]>> {
        match &self.payload {
            Payload::File(contents) => Some(contents.as_deref()),
            Payload::Directory(_) => None,
        }
    }

    /// Replaces the contents of a file, dropping the previous ones
    ///
    /// Returns false (and leaves the entry alone) if this is a directory.
    pub fn set_file_contents(&mut self, contents: Vec<u8>) -> bool {
        match &mut self.payload {
            Payload::File(slot) => {
                *slot = Some(contents);
                true
            }
            Payload::Directory(_) => false,
        }
    }
}
