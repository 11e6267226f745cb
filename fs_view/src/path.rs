//! Path resolution logic
//!
//! Paths are absolute: they start with `/` and are split on `/` into
//! segments. Empty segments (from `//` or a trailing `/`) are skipped. No
//! other normalization happens; `.` and `..` are ordinary names.

use crate::directory::EntryTable;
use crate::entry::MAX_NAME_LEN;
use thiserror::Error;

/// Path separator
pub const SEPARATOR: char = '/';

/// Deepest path accepted, in segments
pub const MAX_DEPTH: usize = 255;

/// Errors that can occur during path resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty, relative, or has an unusable segment
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path component not found during traversal
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempted to traverse through a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Path resolver
///
/// Splits absolute paths and walks them down from a root table.
pub struct PathResolver;

impl PathResolver {
    /// Splits an absolute path into its segments
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_view::PathResolver;
    ///
    /// let components = PathResolver::split_path("/docs/notes/todo.txt").unwrap();
    /// assert_eq!(components, vec!["docs", "notes", "todo.txt"]);
    ///
    /// let components = PathResolver::split_path("//docs///todo.txt/").unwrap();
    /// assert_eq!(components, vec!["docs", "todo.txt"]);
    ///
    /// assert!(PathResolver::split_path("docs/todo.txt").is_err());
    /// ```
    pub fn split_path(path: &str) -> Result<Vec<&str>, PathError> {
        if !path.starts_with(SEPARATOR) {
            return Err(PathError::InvalidPath(format!(
                "'{}' does not start with '{}'",
                path, SEPARATOR
            )));
        }

        let components: Vec<&str> = path
            .split(SEPARATOR)
            .filter(|component| !component.is_empty())
            .collect();

        if components.is_empty() {
            return Err(PathError::InvalidPath(format!(
                "'{}' has no components",
                path
            )));
        }
        if components.len() > MAX_DEPTH {
            return Err(PathError::InvalidPath(format!(
                "more than {} components",
                MAX_DEPTH
            )));
        }
        if let Some(long) = components.iter().find(|c| c.len() > MAX_NAME_LEN) {
            return Err(PathError::InvalidPath(format!(
                "component of {} bytes exceeds {}",
                long.len(),
                MAX_NAME_LEN
            )));
        }

        Ok(components)
    }

    /// Validates a single entry name
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.len() <= MAX_NAME_LEN && !name.contains(SEPARATOR)
    }

    /// Walks every segment but the last and returns the directory holding it
    ///
    /// The final segment is handed back unresolved; whether it must exist is
    /// up to the caller.
    pub fn resolve<'a, 'p>(
        root: &'a EntryTable,
        path: &'p str,
    ) -> Result<(&'a EntryTable, &'p str), PathError> {
        let components = Self::split_path(path)?;
        let (name, parents) = components
            .split_last()
            .ok_or_else(|| PathError::InvalidPath(path.to_string()))?;

        let mut current = root;
        for segment in parents {
            let entry = current
                .find(segment)
                .ok_or_else(|| PathError::NotFound(segment.to_string()))?;
            current = entry
                .as_directory()
                .ok_or_else(|| PathError::NotADirectory(segment.to_string()))?;
        }

        log::trace!("resolved '{}' to parent of '{}'", path, name);
        Ok((current, *name))
    }

    /// Mutable counterpart of [`PathResolver::resolve`]
    pub fn resolve_mut<'a, 'p>(
        root: &'a mut EntryTable,
        path: &'p str,
    ) -> Result<(&'a mut EntryTable, &'p str), PathError> {
        let components = Self::split_path(path)?;
        let (name, parents) = components
            .split_last()
            .ok_or_else(|| PathError::InvalidPath(path.to_string()))?;

        let mut current = root;
        for segment in parents {
            let entry = current
                .find_mut(segment)
                .ok_or_else(|| PathError::NotFound(segment.to_string()))?;
            current = entry
                .as_directory_mut()
                .ok_or_else(|| PathError::NotADirectory(segment.to_string()))?;
        }

        log::trace!("resolved '{}' to parent of '{}' for update", path, name);
        Ok((current, *name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    fn sample_tree() -> EntryTable {
        let mut docs = Entry::directory("docs");
        let children = docs.as_directory_mut().unwrap();
        children.insert(Entry::directory("notes")).unwrap();
        children.insert(Entry::file("todo.txt")).unwrap();

        let mut root = EntryTable::new();
        root.insert(docs).unwrap();
        root.insert(Entry::file("readme")).unwrap();
        root
    }

    #[test]
    fn test_split_simple_path() {
        let result = PathResolver::split_path("/todo.txt").unwrap();
        assert_eq!(result, vec!["todo.txt"]);
    }

    #[test]
    fn test_split_nested_path() {
        let result = PathResolver::split_path("/docs/notes/todo.txt").unwrap();
        assert_eq!(result, vec!["docs", "notes", "todo.txt"]);
    }

    #[test]
    fn test_split_collapses_separators() {
        let result = PathResolver::split_path("/docs//notes/").unwrap();
        assert_eq!(result, vec!["docs", "notes"]);
    }

    #[test]
    fn test_split_keeps_dot_segments() {
        let result = PathResolver::split_path("/docs/../.").unwrap();
        assert_eq!(result, vec!["docs", "..", "."]);
    }

    #[test]
    fn test_relative_path_rejected() {
        let result = PathResolver::split_path("docs/notes");
        assert!(matches!(result, Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_empty_path() {
        let result = PathResolver::split_path("");
        assert!(matches!(result, Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_only_slashes() {
        let result = PathResolver::split_path("///");
        assert!(matches!(result, Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_component_too_long() {
        let ok = format!("/{}", "n".repeat(MAX_NAME_LEN));
        assert!(PathResolver::split_path(&ok).is_ok());

        let too_long = format!("/{}", "n".repeat(MAX_NAME_LEN + 1));
        assert!(matches!(
            PathResolver::split_path(&too_long),
            Err(PathError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_too_deep() {
        let deep = "/d".repeat(MAX_DEPTH + 1);
        assert!(matches!(
            PathResolver::split_path(&deep),
            Err(PathError::InvalidPath(_))
        ));
        assert!(PathResolver::split_path(&"/d".repeat(MAX_DEPTH)).is_ok());
    }

    #[test]
    fn test_is_valid_name() {
        assert!(PathResolver::is_valid_name("todo.txt"));
        assert!(PathResolver::is_valid_name(".."));

        assert!(!PathResolver::is_valid_name(""));
        assert!(!PathResolver::is_valid_name("has/slash"));
        assert!(!PathResolver::is_valid_name(&"x".repeat(MAX_NAME_LEN + 1)));
    }

    #[test]
    fn test_resolve_top_level() {
        let root = sample_tree();
        let (parent, name) = PathResolver::resolve(&root, "/readme").unwrap();
        assert_eq!(name, "readme");
        assert!(parent.find("docs").is_some());
    }

    #[test]
    fn test_resolve_nested_leaves_final_unresolved() {
        let root = sample_tree();
        let (parent, name) = PathResolver::resolve(&root, "/docs/not-there-yet").unwrap();
        assert_eq!(name, "not-there-yet");
        assert!(parent.find("todo.txt").is_some());
    }

    #[test]
    fn test_resolve_missing_parent() {
        let root = sample_tree();
        let result = PathResolver::resolve(&root, "/nowhere/file");
        assert_eq!(
            result.map(|(_, name)| name),
            Err(PathError::NotFound("nowhere".to_string()))
        );
    }

    #[test]
    fn test_resolve_through_file() {
        let root = sample_tree();
        let result = PathResolver::resolve(&root, "/docs/todo.txt/inner");
        assert_eq!(
            result.map(|(_, name)| name),
            Err(PathError::NotADirectory("todo.txt".to_string()))
        );
    }

    #[test]
    fn test_resolve_mut_allows_insert() {
        let mut root = sample_tree();
        let (parent, name) = PathResolver::resolve_mut(&mut root, "/docs/notes/new").unwrap();
        parent.insert(Entry::file(name)).unwrap();

        let (parent, _) = PathResolver::resolve(&root, "/docs/notes/new").unwrap();
        assert!(parent.find("new").is_some());
    }
}
