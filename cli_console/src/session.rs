//! # Console Session
//!
//! The read → execute → render loop over one namespace.

use crate::commands::CommandHandler;
use crate::render::Outcome;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Lines executed, `exit` included
    pub commands: usize,
    /// Lines that answered `no` (or `Not a directory`)
    pub failures: usize,
    /// Whether the session ended on `exit` rather than end of input
    pub exited: bool,
    /// Entries still in the namespace at teardown
    pub released: usize,
}

/// Session state
enum SessionState {
    Running,
    Shutdown,
}

/// One console session
pub struct ConsoleSession {
    handler: CommandHandler,
    state: SessionState,
    summary: SessionSummary,
}

impl ConsoleSession {
    pub fn new(handler: CommandHandler) -> Self {
        Self {
            handler,
            state: SessionState::Running,
            summary: SessionSummary::default(),
        }
    }

    pub fn handler(&self) -> &CommandHandler {
        &self.handler
    }

    /// Runs until `exit` or end of input, then releases the namespace
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> Result<SessionSummary, SessionError> {
        log::info!("session started");
        let mut buf = Vec::new();

        while matches!(self.state, SessionState::Running) {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.step(&line, out)?;
        }

        self.summary.released = self.handler.shutdown();
        log::info!(
            "session ended: {} commands, {} failed, {} entries released",
            self.summary.commands,
            self.summary.failures,
            self.summary.released
        );
        Ok(self.summary)
    }

    /// Executes one line and renders its outcome
    pub fn step<W: Write>(&mut self, line: &str, out: &mut W) -> Result<(), SessionError> {
        let outcome = self.handler.handle_line(line);
        self.summary.commands += 1;
        if outcome.is_failure() {
            self.summary.failures += 1;
        }
        if outcome == Outcome::Exit {
            self.summary.exited = true;
            self.state = SessionState::Shutdown;
        }

        outcome.render(out)?;
        Ok(())
    }
}
