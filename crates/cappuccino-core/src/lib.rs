//! Cappuccino Core - manifest execution engine for repository bootstrapping
//!
//! A repository opts in by shipping a `.cappuccino.yml` at its root. After the
//! repository is cloned, the manifest's actions run in order against the
//! checked-out tree: commands, file copies and moves, deletions and marker
//! substitution. A final pass points the user at any `[cappuccino-warning]`
//! markers left in the result.
//!
//! # Architecture
//!
//! - **Manifest** - document types, validation into a [`Plan`] of typed [`Operation`]s
//! - **Primitives** - single-file copy/move/delete ([`fsops`]) and marker substitution ([`substitute`])
//! - **Engine** - dispatcher and walker that run a plan against one working tree root
//! - **Warnings** - post-run marker scan
//! - **Runtime** - child processes and git
//!
//! # Example Usage
//!
//! ```ignore
//! use cappuccino_core::{Engine, Manifest, ConsoleReporter};
//!
//! let manifest = Manifest::load(&root).await?;
//! let plan = manifest.plan()?;
//! Engine::new(&root, &ConsoleReporter).execute(&plan).await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsops;
pub mod manifest;
pub mod report;
pub mod runtime;
pub mod substitute;
pub mod warnings;

// Re-export main types for convenience
pub use bootstrap::{apply, bootstrap, BootstrapReport};
pub use config::RunConfig;
pub use engine::{Engine, Outcome, RunSummary, SkipReason};
pub use error::{EngineError, ErrorKind};
pub use manifest::{Manifest, Operation, Plan, Scope};
pub use report::{ConsoleReporter, MemoryReporter, Reporter, Status};
pub use warnings::{scan_warnings, ScanReport, WarningLocation};

/// Engine version, compared against the manifest's `version`
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Manifest file name at the working tree root
pub const MANIFEST_FILE: &str = ".cappuccino.yml";

/// Staging directory holding the sources of `template` entries
pub const TEMPLATE_DIR: &str = ".cappuccino";

/// Prefix of framed substitution markers: `[cappuccino-var-<name>]`
pub const VARIABLE_PREFIX: &str = "cappuccino-var";

/// Marker the warning scan looks for
pub const WARNING_MARKER: &str = "[cappuccino-warning]";

/// Version-control metadata removed before any action runs
pub const VCS_DIR: &str = ".git";
