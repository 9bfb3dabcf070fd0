//! Status reporting for user-facing progress output
//!
//! Every component reports through a [`Reporter`] instead of printing directly,
//! so the console rendering stays in one place and tests can capture what a
//! run said.

use colored::{Color, Colorize};
use std::sync::{Mutex, PoisonError};

/// Category of a status line; drives console colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Engine lifecycle messages (starting, cloning, manifest detected)
    Info,
    /// Name of the action about to run
    Action,
    /// One content entry being executed
    Step,
    /// Something the user should look at, never fatal
    Warning,
    /// The failure that aborted the run
    Error,
}

impl Status {
    fn color(self) -> Color {
        match self {
            Status::Info | Status::Warning => Color::Yellow,
            Status::Action | Status::Step => Color::Green,
            Status::Error => Color::Red,
        }
    }
}

/// Sink for status lines
pub trait Reporter: Send + Sync {
    /// Emit one line
    fn report(&self, status: Status, message: &str);

    fn info(&self, message: &str) {
        self.report(Status::Info, message);
    }

    fn warning(&self, message: &str) {
        self.report(Status::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Status::Error, message);
    }
}

/// Prints `Engine <message>` to stdout with a coloured prefix
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, status: Status, message: &str) {
        let prefix = "Engine".color(status.color());
        match status {
            Status::Step => println!("{} \t-> {}", prefix, message),
            Status::Error => eprintln!("{} {}", prefix, message.red()),
            _ => println!("{} {}", prefix, message),
        }
    }
}

/// Keeps every reported line in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(Status, String)>>,
}

impl MemoryReporter {
    /// Empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in order
    pub fn lines(&self) -> Vec<(Status, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages reported with the given status
    pub fn messages(&self, status: Status) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, message)| message)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, status: Status, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((status, message.to_string()));
    }
}
