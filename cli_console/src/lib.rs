//! # CLI Console
//!
//! Line-oriented text front end for the in-memory namespace.
//!
//! Each input line is parsed into a [`ConsoleCommand`], executed against a
//! [`NamespaceService`](services_fs_view::NamespaceService) and rendered as
//! one or more protocol lines (`ok`, `no`, `contenuto <text>`, ...).

pub mod commands;
pub mod config;
pub mod render;
pub mod session;

pub use commands::{CommandError, CommandHandler, CommandParser, ConsoleCommand};
pub use config::{parse_args, CliAction, ConfigError, ConsoleConfig};
pub use render::Outcome;
pub use session::{ConsoleSession, SessionError, SessionSummary};
