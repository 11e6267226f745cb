//! Console commands
//!
//! Parses protocol lines into typed commands and executes them against the
//! namespace service.
//!
//! ## Command Set
//!
//! - `create <path>` / `create_dir <path>` - Create a file / directory
//! - `read <path>` - Print file contents
//! - `write "<content>" <path>` - Replace file contents (path may also come first)
//! - `delete <path>` / `delete_r <path>` - Delete an entry / a whole subtree
//! - `find <name>` - Print every path ending in `name`
//! - `ls <path>` - List a directory (only when listing is enabled)
//! - `exit` - End the session

use crate::render::Outcome;
use fs_view::EntryKind;
use services_fs_view::{ErrorKind, NamespaceOperations, NamespaceService};
use thiserror::Error;

/// Command parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    EmptyLine,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Malformed write: {0}")]
    MalformedWrite(String),
}

/// Console commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Create { path: String },
    CreateDir { path: String },
    Read { path: String },
    /// `content` still carries its quotes
    Write { path: String, content: String },
    Delete { path: String },
    DeleteRecursive { path: String },
    Find { name: String },
    List { path: String },
    Exit,
}

/// Protocol line parser
pub struct CommandParser;

impl CommandParser {
    /// Parses one input line
    ///
    /// A line whose second token starts with `/` and which holds no quote is
    /// always treated as a path command, whatever its first token.
    pub fn parse(line: &str) -> Result<ConsoleCommand, CommandError> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            return Err(CommandError::EmptyLine);
        }

        let has_quote = line.contains('"');
        let mut tokens = line.split(' ').filter(|token| !token.is_empty());
        let cmd = tokens.next().ok_or(CommandError::EmptyLine)?;
        let arg = tokens.next();

        match arg {
            Some(path) if path.starts_with('/') && !has_quote => Self::parse_path_command(cmd, path),
            Some(name) if cmd == "find" => Ok(ConsoleCommand::Find {
                name: name.to_string(),
            }),
            _ if cmd == "write" && has_quote => Self::parse_write(line),
            _ if cmd == "exit" => Ok(ConsoleCommand::Exit),
            None if cmd == "find" => Err(CommandError::MissingArgument("name".to_string())),
            None => Err(CommandError::MissingArgument(cmd.to_string())),
            Some(_) => Err(CommandError::UnknownCommand(cmd.to_string())),
        }
    }

    fn parse_path_command(cmd: &str, path: &str) -> Result<ConsoleCommand, CommandError> {
        let path = path.to_string();
        match cmd {
            "create" => Ok(ConsoleCommand::Create { path }),
            "create_dir" => Ok(ConsoleCommand::CreateDir { path }),
            "read" => Ok(ConsoleCommand::Read { path }),
            "delete" => Ok(ConsoleCommand::Delete { path }),
            "delete_r" => Ok(ConsoleCommand::DeleteRecursive { path }),
            "ls" => Ok(ConsoleCommand::List { path }),
            _ => Err(CommandError::UnknownCommand(cmd.to_string())),
        }
    }

    /// Splits a write line into its quoted content and its path
    ///
    /// The content runs from the first to the last quote on the line. The
    /// path is the first token outside it, before or after.
    fn parse_write(line: &str) -> Result<ConsoleCommand, CommandError> {
        let (first, last) = match (line.find('"'), line.rfind('"')) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(CommandError::MalformedWrite("no quoted content".to_string())),
        };

        let before = line[..first].split(' ').filter(|t| !t.is_empty()).skip(1);
        let after = line[last + 1..].split(' ').filter(|t| !t.is_empty());
        let path = before
            .chain(after)
            .next()
            .ok_or_else(|| CommandError::MissingArgument("path".to_string()))?;
        if !path.starts_with('/') {
            return Err(CommandError::MalformedWrite(format!(
                "'{}' is not an absolute path",
                path
            )));
        }

        Ok(ConsoleCommand::Write {
            path: path.to_string(),
            content: line[first..=last].to_string(),
        })
    }
}

/// Executes console commands against one namespace session
pub struct CommandHandler {
    /// Namespace service
    service: NamespaceService,
    /// Whether `ls` is accepted
    enable_list: bool,
}

impl CommandHandler {
    /// Creates a handler over an empty namespace
    pub fn new() -> Self {
        Self {
            service: NamespaceService::new(),
            enable_list: false,
        }
    }

    /// Turns the `ls` command on or off
    pub fn with_listing(mut self, enabled: bool) -> Self {
        self.enable_list = enabled;
        self
    }

    pub fn service(&self) -> &NamespaceService {
        &self.service
    }

    /// Parses and executes one protocol line
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match CommandParser::parse(line) {
            Ok(command) => self.execute(&command),
            Err(e) => {
                log::debug!("rejected line {:?}: {}", line, e);
                Outcome::No
            }
        }
    }

    /// Executes a parsed command
    pub fn execute(&mut self, command: &ConsoleCommand) -> Outcome {
        let outcome = match command {
            ConsoleCommand::Create { path } => {
                self.service.create(path, EntryKind::File).map(|()| Outcome::Ok)
            }
            ConsoleCommand::CreateDir { path } => self
                .service
                .create(path, EntryKind::Directory)
                .map(|()| Outcome::Ok),
            ConsoleCommand::Read { path } => self.service.read(path).map(|contents| {
                Outcome::Content(
                    contents
                        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                        .unwrap_or_default(),
                )
            }),
            ConsoleCommand::Write { path, content } => {
                self.service.write(path, content).map(Outcome::Written)
            }
            ConsoleCommand::Delete { path } => self.service.delete(path).map(|()| Outcome::Ok),
            ConsoleCommand::DeleteRecursive { path } => {
                self.service.delete_recursive(path).map(|_| Outcome::Ok)
            }
            ConsoleCommand::Find { name } => self.service.find_all(name).map(Outcome::Matches),
            ConsoleCommand::List { path } => return self.list(path),
            ConsoleCommand::Exit => return Outcome::Exit,
        };

        outcome.unwrap_or_else(|e| {
            log::debug!("{:?} failed: {}", command, e);
            Outcome::No
        })
    }

    fn list(&self, path: &str) -> Outcome {
        if !self.enable_list {
            return Outcome::No;
        }
        match self.service.list(path) {
            Ok(entries) => Outcome::Listing(entries),
            Err(e) if e.kind() == ErrorKind::NotADirectory && self.service.exists(path) => {
                Outcome::NotADirectory
            }
            Err(e) => {
                log::debug!("ls {} failed: {}", path, e);
                Outcome::Listing(Vec::new())
            }
        }
    }

    /// Releases the namespace, returning how many entries it held
    pub fn shutdown(&mut self) -> usize {
        self.service.reset()
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
