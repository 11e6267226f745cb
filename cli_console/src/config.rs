//! Console configuration
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Accept the `ls` command
    pub enable_list: bool,
    /// Read commands from this file instead of stdin
    pub script: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            enable_list: false,
            script: None,
        }
    }
}

impl ConsoleConfig {
    /// Parses a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.level_filter()?;
        Ok(config)
    }

    /// Loads a JSON configuration file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// The configured log level
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Run a session with this configuration
    Run(ConsoleConfig),
    /// Print usage and stop
    Help,
}

/// Parses command-line arguments (`args[0]` is the program name)
///
/// `--config` is applied first wherever it appears; the other flags override
/// what it sets.
pub fn parse_args(args: &[String]) -> Result<CliAction, ConfigError> {
    let rest = args.get(1..).unwrap_or_default();

    let mut config = match rest.iter().position(|arg| arg == "--config" || arg == "-c") {
        Some(i) => {
            let path = rest
                .get(i + 1)
                .ok_or_else(|| ConfigError::MissingValue("--config".to_string()))?;
            ConsoleConfig::load(path)?
        }
        None => ConsoleConfig::default(),
    };

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--config" | "-c" => {
                i += 1;
            }
            "--script" | "-s" => {
                i += 1;
                let path = rest
                    .get(i)
                    .ok_or_else(|| ConfigError::MissingValue("--script".to_string()))?;
                config.script = Some(PathBuf::from(path));
            }
            "--log-level" => {
                i += 1;
                let level = rest
                    .get(i)
                    .ok_or_else(|| ConfigError::MissingValue("--log-level".to_string()))?;
                config.log_level = level.clone();
                config.level_filter()?;
            }
            "--enable-list" => {
                config.enable_list = true;
            }
            "--help" | "-h" => return Ok(CliAction::Help),
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(CliAction::Run(config))
}
