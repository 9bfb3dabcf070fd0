//! The full run: clone, load, execute, scan

use crate::config::RunConfig;
use crate::engine::{Engine, RunSummary};
use crate::error::Result;
use crate::manifest::{check_compatibility, Manifest};
use crate::report::Reporter;
use crate::runtime::git;
use crate::warnings::{self, ScanReport};
use crate::ENGINE_VERSION;
use std::path::{Path, PathBuf};

/// What a finished run did
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// Root of the cloned working tree
    pub root: PathBuf,
    /// Operation counts from the manifest run
    pub summary: RunSummary,
    /// `None` when the scan was disabled
    pub warnings: Option<ScanReport>,
}

/// Clone the repository described by `config` and apply its manifest
pub async fn bootstrap(config: &RunConfig, reporter: &dyn Reporter) -> Result<BootstrapReport> {
    reporter.info(&format!("Starting engine ({})", ENGINE_VERSION));

    reporter.info(&format!("Checking git url format ({})", config.url));
    let name = git::verify_git_url(&config.url)?;
    reporter.info("Git url format successfuly verified");

    reporter.info(&format!(
        "Cloning git repository (branch: {})",
        config.branch
    ));
    let root =
        git::clone_repository(&config.url, &config.branch, &config.directory, &name).await?;

    apply(&root, config, reporter).await
}

/// Load the manifest in an existing working tree and run it
pub async fn apply(
    root: &Path,
    config: &RunConfig,
    reporter: &dyn Reporter,
) -> Result<BootstrapReport> {
    let manifest = Manifest::load(root).await?;
    reporter.info("File .cappuccino.yml detected");
    reporter.info(&format!("Detected version: {}", manifest.version));

    if let Some(warning) = check_compatibility(ENGINE_VERSION, &manifest.version) {
        reporter.warning(&warning);
    }

    let plan = manifest.plan()?;
    tracing::debug!(
        actions = plan.steps.len(),
        operations = plan.operation_count(),
        "manifest validated"
    );

    let engine = Engine::new(root, reporter).with_exec_timeout(config.exec_timeout);
    let summary = engine.execute(&plan).await?;

    let warnings = if config.scan_warnings {
        Some(warnings::scan_warnings(root, reporter).await)
    } else {
        None
    };

    Ok(BootstrapReport {
        root: root.to_path_buf(),
        summary,
        warnings,
    })
}
