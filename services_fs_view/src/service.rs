//! Namespace service implementation
//!
//! This module provides the session object that owns the namespace root and
//! implements the namespace operations on it.

use crate::operations::{unquote, ListedEntry, NamespaceOperations, OperationError};
use crate::search::SearchEngine;
use fs_view::{Entry, EntryKind, EntryTable, PathResolver};

/// The namespace service
///
/// Owns the root directory for the lifetime of a session. Dropping the
/// service releases the whole tree.
#[derive(Debug, Default)]
pub struct NamespaceService {
    root: EntryTable,
}

impl NamespaceService {
    /// Creates a service with an empty root directory
    pub fn new() -> Self {
        Self {
            root: EntryTable::new(),
        }
    }

    /// The root directory table
    pub fn root(&self) -> &EntryTable {
        &self.root
    }

    /// Resolves a path to the entry it names
    pub fn lookup(&self, path: &str) -> Result<&Entry, OperationError> {
        let (parent, name) = PathResolver::resolve(&self.root, path)?;
        parent
            .find(name)
            .ok_or_else(|| OperationError::NotFound(path.to_string()))
    }

    /// Checks whether a path names an existing entry
    pub fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    /// Drops every entry below the root
    ///
    /// Returns how many entries were released.
    pub fn reset(&mut self) -> usize {
        let released = self.root.clear();
        log::debug!("released {} entries", released);
        released
    }
}

impl NamespaceOperations for NamespaceService {
    fn create(&mut self, path: &str, kind: EntryKind) -> Result<(), OperationError> {
        let (parent, name) = PathResolver::resolve_mut(&mut self.root, path)?;
        parent.insert(Entry::new(kind, name))?;
        log::debug!("created {} {}", kind, path);
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Option<&[u8]>, OperationError> {
        self.lookup(path)?
            .file_contents()
            .ok_or_else(|| OperationError::NotAFile(path.to_string()))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<usize, OperationError> {
        let text = unquote(content)?;

        let (parent, name) = PathResolver::resolve_mut(&mut self.root, path)?;
        let entry = parent
            .find_mut(name)
            .ok_or_else(|| OperationError::NotFound(path.to_string()))?;
        if !entry.set_file_contents(text.as_bytes().to_vec()) {
            return Err(OperationError::NotAFile(path.to_string()));
        }

        log::debug!("wrote {} bytes to {}", text.len(), path);
        Ok(text.len())
    }

    fn delete(&mut self, path: &str) -> Result<(), OperationError> {
        let (parent, name) = PathResolver::resolve_mut(&mut self.root, path)?;
        let entry = parent
            .find(name)
            .ok_or_else(|| OperationError::NotFound(path.to_string()))?;
        if entry.as_directory().is_some_and(|children| !children.is_empty()) {
            return Err(OperationError::DirectoryNotEmpty(path.to_string()));
        }

        parent.remove(name)?;
        log::debug!("deleted {}", path);
        Ok(())
    }

    fn delete_recursive(&mut self, path: &str) -> Result<usize, OperationError> {
        let (parent, name) = PathResolver::resolve_mut(&mut self.root, path)?;
        if parent.find(name).is_none() {
            return Err(OperationError::NotFound(path.to_string()));
        }

        let removed = parent.remove_subtree(name)?;
        log::debug!("deleted {} entries under {}", removed, path);
        Ok(removed)
    }

    fn list(&self, path: &str) -> Result<Vec<ListedEntry>, OperationError> {
        let table = if path == "/" {
            &self.root
        } else {
            self.lookup(path)?
                .as_directory()
                .ok_or_else(|| OperationError::NotADirectory(path.to_string()))?
        };

        Ok(table
            .iter()
            .map(|entry| ListedEntry {
                kind: entry.kind(),
                name: entry.name().to_string(),
            })
            .collect())
    }

    fn find_all(&self, name: &str) -> Result<Vec<String>, OperationError> {
        SearchEngine::new(&self.root).find_all(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::ErrorKind;

    #[test]
    fn test_service_creation() {
        let service = NamespaceService::new();
        assert!(service.root().is_empty());
    }

    #[test]
    fn test_create_file_and_directory() {
        let mut service = NamespaceService::new();
        service.create("/docs", EntryKind::Directory).unwrap();
        service.create("/docs/readme", EntryKind::File).unwrap();

        assert_eq!(service.lookup("/docs").unwrap().kind(), EntryKind::Directory);
        assert_eq!(service.lookup("/docs/readme").unwrap().kind(), EntryKind::File);
    }

    #[test]
    fn test_create_already_exists() {
        let mut service = NamespaceService::new();
        service.create("/docs", EntryKind::Directory).unwrap();

        let err = service.create("/docs", EntryKind::File).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(service.lookup("/docs").unwrap().kind(), EntryKind::Directory);
    }

    #[test]
    fn test_create_under_missing_parent() {
        let mut service = NamespaceService::new();
        let err = service.create("/nope/file", EntryKind::File).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_create_under_file() {
        let mut service = NamespaceService::new();
        service.create("/file", EntryKind::File).unwrap();
        let err = service.create("/file/inner", EntryKind::File).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_create_root_is_invalid() {
        let mut service = NamespaceService::new();
        let err = service.create("/", EntryKind::Directory).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathInvalid);
    }

    #[test]
    fn test_read_unwritten_file() {
        let mut service = NamespaceService::new();
        service.create("/empty", EntryKind::File).unwrap();
        assert_eq!(service.read("/empty"), Ok(None));
    }

    #[test]
    fn test_read_directory_fails() {
        let mut service = NamespaceService::new();
        service.create("/dir", EntryKind::Directory).unwrap();
        assert_eq!(service.read("/dir").unwrap_err().kind(), ErrorKind::NotAFile);
    }

    #[test]
    fn test_write_then_read() {
        let mut service = NamespaceService::new();
        service.create("/note", EntryKind::File).unwrap();

        assert_eq!(service.write("/note", "\"hello world\""), Ok(11));
        assert_eq!(service.read("/note"), Ok(Some(&b"hello world"[..])));

        assert_eq!(service.write("/note", "\"x\""), Ok(1));
        assert_eq!(service.read("/note"), Ok(Some(&b"x"[..])));
    }

    #[test]
    fn test_malformed_write_leaves_file_untouched() {
        let mut service = NamespaceService::new();
        service.create("/note", EntryKind::File).unwrap();
        service.write("/note", "\"keep\"").unwrap();

        let err = service.write("/note", "no quotes").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContentMalformed);
        assert_eq!(service.read("/note"), Ok(Some(&b"keep"[..])));
    }

    #[test]
    fn test_write_to_directory_fails() {
        let mut service = NamespaceService::new();
        service.create("/dir", EntryKind::Directory).unwrap();
        let err = service.write("/dir", "\"x\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAFile);
    }

    #[test]
    fn test_write_missing_file() {
        let mut service = NamespaceService::new();
        let err = service.write("/ghost", "\"x\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_file() {
        let mut service = NamespaceService::new();
        service.create("/f", EntryKind::File).unwrap();
        service.delete("/f").unwrap();
        assert!(!service.exists("/f"));
        assert_eq!(service.delete("/f").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_empty_directory() {
        let mut service = NamespaceService::new();
        service.create("/d", EntryKind::Directory).unwrap();
        service.delete("/d").unwrap();
        assert!(service.root().is_empty());
    }

    #[test]
    fn test_delete_non_empty_directory() {
        let mut service = NamespaceService::new();
        service.create("/d", EntryKind::Directory).unwrap();
        service.create("/d/f", EntryKind::File).unwrap();

        let err = service.delete("/d").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryNotEmpty);
        assert!(service.exists("/d/f"));
    }

    #[test]
    fn test_delete_recursive_counts() {
        let mut service = NamespaceService::new();
        service.create("/d", EntryKind::Directory).unwrap();
        service.create("/d/e", EntryKind::Directory).unwrap();
        service.create("/d/e/f", EntryKind::File).unwrap();
        service.create("/d/g", EntryKind::File).unwrap();
        service.create("/keep", EntryKind::File).unwrap();

        assert_eq!(service.delete_recursive("/d"), Ok(4));
        assert!(!service.exists("/d"));
        assert!(service.exists("/keep"));
        assert_eq!(service.root().len(), 1);
    }

    #[test]
    fn test_delete_recursive_file() {
        let mut service = NamespaceService::new();
        service.create("/f", EntryKind::File).unwrap();
        assert_eq!(service.delete_recursive("/f"), Ok(1));
        assert_eq!(
            service.delete_recursive("/f").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_list_root_and_subdirectory() {
        let mut service = NamespaceService::new();
        service.create("/b", EntryKind::Directory).unwrap();
        service.create("/a", EntryKind::File).unwrap();
        service.create("/b/c", EntryKind::File).unwrap();

        let root = service.list("/").unwrap();
        assert_eq!(
            root,
            vec![
                ListedEntry {
                    kind: EntryKind::File,
                    name: "a".to_string()
                },
                ListedEntry {
                    kind: EntryKind::Directory,
                    name: "b".to_string()
                },
            ]
        );

        let sub = service.list("/b").unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].name, "c");
    }

    #[test]
    fn test_list_file_fails() {
        let mut service = NamespaceService::new();
        service.create("/f", EntryKind::File).unwrap();
        assert_eq!(service.list("/f").unwrap_err().kind(), ErrorKind::NotADirectory);
        assert_eq!(service.list("/nope").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut service = NamespaceService::new();
        service.create("/d", EntryKind::Directory).unwrap();
        service.create("/d/f", EntryKind::File).unwrap();
        service.create("/g", EntryKind::File).unwrap();

        assert_eq!(service.reset(), 3);
        assert!(service.root().is_empty());
    }
}
