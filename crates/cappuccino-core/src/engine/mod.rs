//! Manifest execution
//!
//! [`Engine`] owns the working tree root and the reporting sink. The walker
//! drives actions and their entries in order, the dispatcher runs one
//! [`Operation`](crate::manifest::Operation) at a time.

mod dispatch;
mod walker;

pub use dispatch::{Outcome, SkipReason};
pub use walker::RunSummary;

use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Executes a validated plan against one working tree
pub struct Engine<'a> {
    root: PathBuf,
    reporter: &'a dyn Reporter,
    exec_timeout: Option<Duration>,
}

impl<'a> Engine<'a> {
    /// Create an engine rooted at `root`; every manifest path is resolved against it
    pub fn new(root: impl Into<PathBuf>, reporter: &'a dyn Reporter) -> Self {
        Self {
            root: root.into(),
            reporter,
            exec_timeout: None,
        }
    }

    /// Kill `exec` commands that run longer than `limit`
    pub fn with_exec_timeout(mut self, limit: Option<Duration>) -> Self {
        self.exec_timeout = limit;
        self
    }

    /// Working tree root all manifest paths resolve against
    pub fn root(&self) -> &Path {
        &self.root
    }
}
