//! Whole-tree name search
//!
//! Walks every directory below a root, collects the absolute path of each
//! entry whose name matches, and returns them sorted. The collector only
//! lives for one call.

use crate::operations::OperationError;
use fs_view::{EntryTable, PathResolver, SEPARATOR};
use std::collections::BTreeSet;

/// Name search over one namespace tree
pub struct SearchEngine<'a> {
    root: &'a EntryTable,
}

impl<'a> SearchEngine<'a> {
    pub fn new(root: &'a EntryTable) -> Self {
        Self { root }
    }

    /// Returns every absolute path ending in `name`, ascending and unique
    pub fn find_all(&self, name: &str) -> Result<Vec<String>, OperationError> {
        let mut found = BTreeSet::new();
        if PathResolver::is_valid_name(name) {
            let mut segments = Vec::new();
            Self::scan(self.root, name, &mut segments, &mut found);
        }

        log::debug!("search for '{}' matched {} entries", name, found.len());
        if found.is_empty() {
            return Err(OperationError::NoMatches(name.to_string()));
        }
        Ok(found.into_iter().collect())
    }

    /// Visits `table` in iteration order, descending into subdirectories
    fn scan<'t>(
        table: &'t EntryTable,
        target: &str,
        segments: &mut Vec<&'t str>,
        found: &mut BTreeSet<String>,
    ) {
        for entry in table.iter() {
            if entry.name() == target {
                found.insert(join_path(segments, entry.name()));
            }

            if let Some(children) = entry.as_directory() {
                segments.push(entry.name());
                Self::scan(children, target, segments, found);
                segments.pop();
            }
        }
    }
}

/// Builds `/seg/seg/.../name`
fn join_path(segments: &[&str], name: &str) -> String {
    let mut path = String::new();
    for segment in segments.iter().chain(std::iter::once(&name)) {
        path.push(SEPARATOR);
        path.push_str(segment);
    }
    path
}
