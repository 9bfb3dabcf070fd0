//! Manifest types, loading and validation
//!
//! This module provides:
//! - The document types deserialized from `.cappuccino.yml`
//! - Validation into a [`Plan`] of typed [`Operation`]s
//! - Version compatibility checking

pub mod model;
pub mod operation;
pub mod version;

use crate::error::{EngineError, Result};
use crate::MANIFEST_FILE;
use std::path::Path;
use tokio::fs;

pub use model::{Action, ContentEntry, Manifest};
pub use operation::{variable_marker, Operation, Plan, Scope, Step};
pub use version::check_compatibility;

impl Manifest {
    /// Read and parse `.cappuccino.yml` from the working tree root
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| EngineError::ManifestRead {
                path: MANIFEST_FILE.into(),
                source,
            })?;

        Self::parse(&content)
    }

    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| EngineError::ManifestParse {
            path: MANIFEST_FILE.into(),
            source,
        })
    }
}
