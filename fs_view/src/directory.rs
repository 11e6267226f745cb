//! Directory entry tables
//!
//! Every directory owns an [`EntryTable`]: a fixed set of hash buckets, each
//! holding the chain of entries whose name lands in it. Iteration walks the
//! buckets in index order and each chain in insertion order; listings and
//! searches rely on exactly that order.

use crate::entry::Entry;
use thiserror::Error;

/// Number of hash buckets per directory
pub const BUCKET_COUNT: usize = 1024;

/// Maximum number of entries a single directory can hold
pub const MAX_ENTRIES: usize = 1024;

/// Errors raised by table mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// An entry with this name is already present
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The directory holds `capacity` entries already
    #[error("Directory is full ({capacity} entries)")]
    CapacityExceeded { capacity: usize },

    /// No entry with this name
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Maps a name to its bucket index
///
/// Polynomial accumulation (`h * 31 + byte`) on 32 bits. Bytes above 0x7f
/// are sign-extended before being added.
fn bucket_of(name: &str) -> usize {
    let hash = name.as_bytes().iter().fold(0u32, |hash, &byte| {
        hash.wrapping_mul(31).wrapping_add(byte as i8 as i32 as u32)
    });
    hash as usize % BUCKET_COUNT
}

/// Hash-chained table of the entries of one directory
#[derive(Debug, Default)]
pub struct EntryTable {
    /// Empty until the first insert, then exactly `BUCKET_COUNT` chains
    buckets: Vec<Vec<Entry>>,
    nitems: usize,
}

impl EntryTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            nitems: 0,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.nitems
    }

    pub fn is_empty(&self) -> bool {
        self.nitems == 0
    }

    pub fn is_full(&self) -> bool {
        self.nitems >= MAX_ENTRIES
    }

    /// Looks up an entry by name
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.buckets
            .get(bucket_of(name))?
            .iter()
            .find(|entry| entry.name() == name)
    }

    /// Looks up an entry by name for mutation
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.buckets
            .get_mut(bucket_of(name))?
            .iter_mut()
            .find(|entry| entry.name() == name)
    }

    /// Adds an entry at the end of its bucket chain
    ///
    /// A rejected entry is dropped together with its payload.
    pub fn insert(&mut self, entry: Entry) -> Result<(), TableError> {
        if self.is_full() {
            log::warn!(
                "rejecting '{}': directory already holds {} entries",
                entry.name(),
                MAX_ENTRIES
            );
            return Err(TableError::CapacityExceeded {
                capacity: MAX_ENTRIES,
            });
        }

        if self.buckets.is_empty() {
            self.buckets.resize_with(BUCKET_COUNT, Vec::new);
        }

        let chain = &mut self.buckets[bucket_of(entry.name())];
        if chain.iter().any(|existing| existing.name() == entry.name()) {
            return Err(TableError::AlreadyExists(entry.name().to_string()));
        }

        chain.push(entry);
        self.nitems += 1;
        Ok(())
    }

    /// Unlinks an entry and hands it back to the caller
    pub fn remove(&mut self, name: &str) -> Result<Entry, TableError> {
        let chain = self
            .buckets
            .get_mut(bucket_of(name))
            .ok_or_else(|| TableError::NotFound(name.to_string()))?;
        let position = chain
            .iter()
            .position(|entry| entry.name() == name)
            .ok_or_else(|| TableError::NotFound(name.to_string()))?;

        let entry = chain.remove(position);
        self.nitems -= 1;
        Ok(entry)
    }

    /// Removes an entry and, for a directory, everything below it
    ///
    /// Children go before their directory. Returns how many entries were
    /// removed, the named one included.
    pub fn remove_subtree(&mut self, name: &str) -> Result<usize, TableError> {
        let mut removed = 0;
        if let Some(children) = self.find_mut(name).and_then(Entry::as_directory_mut) {
            removed += children.clear();
        }
        self.remove(name)?;
        Ok(removed + 1)
    }

    /// Removes every entry, depth first, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let names: Vec<String> = self.iter().map(|entry| entry.name().to_string()).collect();

        let mut removed = 0;
        for name in &names {
            if let Ok(count) = self.remove_subtree(name) {
                removed += count;
            }
        }
        removed
    }

    /// Iterates entries bucket by bucket, each chain in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }
}
