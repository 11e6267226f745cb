//! # Logger Service
//!
//! This crate implements structured logging behind the `log` facade.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style. Every
//! record becomes a [`LogEntry`] with a level, a target and key/value fields
//! before anything is written. Entries go to stderr so they never mix with
//! command output.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Fine-grained tracing
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Emitting module
    pub target: String,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Builds an entry from a `log` record
    pub fn from_record(record: &Record<'_>) -> Self {
        let mut entry = Self::new(
            record.level().into(),
            record.target(),
            record.args().to_string(),
        );
        if let Some(file) = record.file() {
            entry = entry.with_field("file", file);
        }
        if let Some(line) = record.line() {
            entry = entry.with_field("line", line.to_string());
        }
        entry
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// One-line rendering: `LEVEL target: message key=value ...`
    pub fn render(&self) -> String {
        let mut line = format!("{} {}: {}", self.level.as_str(), self.target, self.message);
        for (key, value) in &self.fields {
            line.push(' ');
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        line
    }
}

/// `log` backend writing one rendered [`LogEntry`] per record to stderr
#[derive(Debug)]
pub struct StructuredLogger {
    level: LevelFilter,
}

impl StructuredLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StructuredLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry::from_record(record);
        let _ = writeln!(std::io::stderr().lock(), "{}", entry.render());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs [`StructuredLogger`] as the global logger
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StructuredLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
