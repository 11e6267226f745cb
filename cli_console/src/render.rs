//! Outcome rendering
//!
//! Every executed line produces one [`Outcome`]; this module turns it into
//! the protocol's output lines.

use services_fs_view::ListedEntry;
use std::io::{self, Write};

/// Result of one console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Plain success
    Ok,
    /// Write succeeded with this many bytes
    Written(usize),
    /// File contents (empty when never written)
    Content(String),
    /// Search results, already ordered
    Matches(Vec<String>),
    /// Directory children in table order
    Listing(Vec<ListedEntry>),
    /// Listing aimed at a file
    NotADirectory,
    /// Any failure
    No,
    /// End of session
    Exit,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::No | Outcome::NotADirectory)
    }

    /// Output lines for this outcome, without terminators
    pub fn lines(&self) -> Vec<String> {
        match self {
            Outcome::Ok => vec!["ok".to_string()],
            Outcome::Written(bytes) => vec![format!("ok {}", bytes)],
            Outcome::Content(text) => vec![format!("contenuto {}", text)],
            Outcome::Matches(paths) => paths.iter().map(|path| format!("ok {}", path)).collect(),
            Outcome::Listing(entries) => entries
                .iter()
                .map(|entry| format!("{} {}", entry.kind.tag(), entry.name))
                .collect(),
            Outcome::NotADirectory => vec!["Not a directory".to_string()],
            Outcome::No => vec!["no".to_string()],
            Outcome::Exit => Vec::new(),
        }
    }

    /// Writes the outcome's lines to `out`
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}
